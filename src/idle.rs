use chrono::{DateTime, Duration as ChronoDuration, Local};
use std::process::Command;
use std::time::Duration;
use tracing::{debug, warn};

/// Reports how long the user has been away from keyboard and mouse
pub trait IdleProbe {
    /// Seconds since the last user input, `None` if it can't be determined
    fn idle_seconds(&mut self) -> Option<u64>;
}

/// X11 idle time via the `xprintidle` helper (prints milliseconds)
#[derive(Debug, Default)]
pub struct XprintIdleProbe {
    unavailable: bool,
}

impl XprintIdleProbe {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdleProbe for XprintIdleProbe {
    fn idle_seconds(&mut self) -> Option<u64> {
        if self.unavailable {
            return None;
        }
        match Command::new("xprintidle").output() {
            Ok(output) if output.status.success() => {
                parse_idle_millis(&String::from_utf8_lossy(&output.stdout)).map(|ms| ms / 1000)
            }
            Ok(output) => {
                debug!("xprintidle exited with {}", output.status);
                None
            }
            Err(e) => {
                warn!("Idle detection disabled, xprintidle not runnable: {}", e);
                self.unavailable = true;
                None
            }
        }
    }
}

/// Used where no idle source exists; idle checks never fire
#[derive(Debug, Default)]
pub struct NoIdleProbe;

impl IdleProbe for NoIdleProbe {
    fn idle_seconds(&mut self) -> Option<u64> {
        None
    }
}

/// The idle probe for this platform
pub fn platform_probe() -> Box<dyn IdleProbe> {
    if cfg!(target_os = "linux") {
        Box::new(XprintIdleProbe::new())
    } else {
        warn!("Idle detection is not supported on this platform");
        Box::new(NoIdleProbe)
    }
}

fn parse_idle_millis(output: &str) -> Option<u64> {
    output.trim().parse().ok()
}

/// Decides when an open session has gone idle long enough to ask about it
///
/// Fires at most once per idle episode; the episode ends when input resumes
/// (idle time drops below the threshold) or the caller calls `reset`.
#[derive(Debug, Clone)]
pub struct IdleMonitor {
    threshold: Duration,
    poll_interval: Duration,
    last_poll: Option<DateTime<Local>>,
    reported: bool,
}

impl IdleMonitor {
    pub fn new(threshold: Duration, poll_interval: Duration) -> Self {
        Self {
            threshold,
            poll_interval,
            last_poll: None,
            reported: false,
        }
    }

    /// Forget the current episode
    pub fn reset(&mut self) {
        self.reported = false;
        self.last_poll = None;
    }

    /// Check the probe if a poll is due
    ///
    /// Returns the moment the user went idle when the threshold is first
    /// crossed during a tracking session.
    pub fn poll(
        &mut self,
        probe: &mut dyn IdleProbe,
        now: DateTime<Local>,
        tracking: bool,
    ) -> Option<DateTime<Local>> {
        if !tracking {
            self.reset();
            return None;
        }
        if let Some(last) = self.last_poll {
            let since = now.signed_duration_since(last);
            if since >= ChronoDuration::zero() && since.to_std().unwrap_or_default() < self.poll_interval {
                return None;
            }
        }
        self.last_poll = Some(now);

        let idle = Duration::from_secs(probe.idle_seconds()?);
        if idle < self.threshold {
            self.reported = false;
            return None;
        }
        if self.reported {
            return None;
        }

        self.reported = true;
        let idle_since = now - ChronoDuration::from_std(idle).unwrap_or_else(|_| ChronoDuration::zero());
        debug!("User idle for {}s, since {}", idle.as_secs(), idle_since);
        Some(idle_since)
    }
}
