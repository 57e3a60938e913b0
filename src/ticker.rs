use std::time::{Duration, Instant};

/// Redraw cadence for the elapsed-time display
pub const ELAPSED_TICK: Duration = Duration::from_secs(1);

/// Longest the event loop waits for input when nothing is ticking
pub const IDLE_WAIT: Duration = Duration::from_millis(500);

/// Once-a-second redraw of the elapsed time, alive only while tracking
///
/// Armed when a session starts; disarms itself on the first poll after the
/// session has ended.
#[derive(Debug, Clone)]
pub struct ElapsedTicker {
    next_due: Option<Instant>,
}

impl ElapsedTicker {
    pub fn new(tracking: bool, now: Instant) -> Self {
        let mut ticker = Self { next_due: None };
        if tracking {
            ticker.arm(now);
        }
        ticker
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + ELAPSED_TICK);
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Whether a redraw is due now; reschedules itself only while tracking
    pub fn poll(&mut self, now: Instant, tracking: bool) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if !tracking {
            self.next_due = None;
            return false;
        }
        if now >= due {
            self.next_due = Some(now + ELAPSED_TICK);
            true
        } else {
            false
        }
    }

    /// How long the event loop may block before the next tick
    pub fn timeout(&self, now: Instant) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now).min(IDLE_WAIT),
            None => IDLE_WAIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_ticker_never_fires() {
        let now = Instant::now();
        let mut ticker = ElapsedTicker::new(false, now);
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(now + Duration::from_secs(5), false));
        assert_eq!(ticker.timeout(now), IDLE_WAIT);
    }

    #[test]
    fn test_fires_once_per_second_while_tracking() {
        let now = Instant::now();
        let mut ticker = ElapsedTicker::new(true, now);
        assert!(!ticker.poll(now + Duration::from_millis(400), true));
        assert!(ticker.poll(now + Duration::from_secs(1), true));
        assert!(!ticker.poll(now + Duration::from_millis(1500), true));
        assert!(ticker.poll(now + Duration::from_secs(2), true));
    }

    #[test]
    fn test_self_cancels_after_tracking_stops() {
        let now = Instant::now();
        let mut ticker = ElapsedTicker::new(true, now);
        assert!(!ticker.poll(now + Duration::from_secs(3), false));
        assert!(!ticker.is_armed());

        ticker.arm(now);
        assert!(ticker.is_armed());
    }

    #[test]
    fn test_timeout_bounded() {
        let now = Instant::now();
        let ticker = ElapsedTicker::new(true, now);
        assert_eq!(ticker.timeout(now), IDLE_WAIT);
        assert_eq!(ticker.timeout(now + Duration::from_millis(900)), Duration::from_millis(100));
        assert_eq!(ticker.timeout(now + Duration::from_secs(2)), Duration::ZERO);
    }
}
