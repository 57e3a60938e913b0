use super::enums::{PrimaryAction, TrackingStatus};
use super::events::{EventQueue, TrackingEvent};
use super::interval::{validate_labels, WorkedInterval};
use crate::error::{TrackingError, TransitionError};
use chrono::{DateTime, Duration, Local};
use tracing::debug;

/// Which tracking controls are currently usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enablement {
    pub can_start: bool,
    pub can_set_task: bool,
    pub can_stop: bool,
    pub can_abort: bool,
}

/// The one open tracking session of the process, plus the labels it is for
///
/// `start_time` present means tracking is active. Labels are independent of
/// it: they may be chosen before starting or while a session is already open,
/// but once both are set during a session they are locked until it ends.
#[derive(Debug, Clone, Default)]
pub struct TrackingState {
    start_time: Option<DateTime<Local>>,
    task: String,
    client: String,
    events: EventQueue<TrackingEvent>,
}

impl TrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state read back from disk (emits no events)
    pub fn restore(start_time: Option<DateTime<Local>>, task: String, client: String) -> Self {
        Self {
            start_time,
            task,
            client,
            events: EventQueue::default(),
        }
    }

    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.start_time
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn status(&self) -> TrackingStatus {
        if self.start_time.is_some() {
            TrackingStatus::Tracking
        } else {
            TrackingStatus::Idle
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start_time.is_some()
    }

    /// Both task and client are non-empty
    pub fn labels_set(&self) -> bool {
        !self.task.trim().is_empty() && !self.client.trim().is_empty()
    }

    fn labels_empty(&self) -> bool {
        self.task.trim().is_empty() && self.client.trim().is_empty()
    }

    pub fn can_start(&self) -> bool {
        !self.is_tracking()
    }

    pub fn can_set_task(&self) -> bool {
        !self.is_tracking() || self.labels_empty()
    }

    pub fn can_stop(&self) -> bool {
        self.is_tracking() && self.labels_set()
    }

    pub fn can_abort(&self) -> bool {
        self.is_tracking()
    }

    pub fn enablement(&self) -> Enablement {
        Enablement {
            can_start: self.can_start(),
            can_set_task: self.can_set_task(),
            can_stop: self.can_stop(),
            can_abort: self.can_abort(),
        }
    }

    /// Open a session at `now`
    pub fn start_tracking(&mut self, now: DateTime<Local>) -> Result<(), TransitionError> {
        if self.is_tracking() {
            debug!("Start tracking rejected: already tracking");
            return Err(TransitionError::AlreadyTracking);
        }
        self.start_time = Some(now);
        self.events.push(TrackingEvent::Started);
        debug!("Start tracking at {}", now);
        Ok(())
    }

    /// Choose the task and client; starts tracking if no session is open
    ///
    /// Returns whether this call opened the session.
    pub fn set_task_and_client(
        &mut self,
        task: &str,
        client: &str,
        now: DateTime<Local>,
    ) -> Result<bool, TrackingError> {
        if !self.can_set_task() {
            debug!("Set task rejected: labels locked while tracking");
            return Err(TransitionError::LabelsLocked.into());
        }
        validate_labels(task, client)?;

        self.task = task.trim().to_string();
        self.client = client.trim().to_string();
        self.events.push(TrackingEvent::LabelsChanged);
        debug!("Tracking task {:?} for {:?}", self.task, self.client);

        if self.is_tracking() {
            Ok(false)
        } else {
            self.start_tracking(now)?;
            Ok(true)
        }
    }

    /// Close the session at `now`, producing the worked interval
    pub fn stop_tracking(&mut self, now: DateTime<Local>) -> Result<WorkedInterval, TransitionError> {
        self.stop_tracking_at(now)
    }

    /// Close the session at `end` (clamped to the start), producing the worked interval
    pub fn stop_tracking_at(&mut self, end: DateTime<Local>) -> Result<WorkedInterval, TransitionError> {
        let start = self.start_time.ok_or(TransitionError::NotTracking)?;
        if !self.labels_set() {
            debug!("Stop tracking rejected: labels missing");
            return Err(TransitionError::LabelsMissing);
        }

        let end = end.max(start);
        let interval = WorkedInterval::new(start, end, self.task.clone(), self.client.clone())
            .map_err(|_| TransitionError::LabelsMissing)?;

        self.start_time = None;
        self.events.push(TrackingEvent::Stopped(interval.clone()));
        debug!("Stop tracking after {}s", interval.duration().num_seconds());
        Ok(interval)
    }

    /// Drop the open session without producing an interval
    pub fn abort_tracking(&mut self) -> Result<(), TransitionError> {
        if self.start_time.take().is_none() {
            return Err(TransitionError::NotTracking);
        }
        self.events.push(TrackingEvent::Aborted);
        debug!("Abort tracking");
        Ok(())
    }

    /// Time since the session opened (zero when idle)
    pub fn elapsed(&self, now: DateTime<Local>) -> Duration {
        match self.start_time {
            Some(start) => std::cmp::max(Duration::zero(), now.signed_duration_since(start)),
            None => Duration::zero(),
        }
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.can_start() {
            PrimaryAction::Start
        } else if self.can_stop() {
            PrimaryAction::Stop
        } else {
            PrimaryAction::OpenDialog
        }
    }

    /// Multi-line status summary ("Working / On: task / For: client")
    pub fn status_text(&self) -> String {
        let mut lines = vec![self.status().label().to_string()];
        if !self.task.is_empty() {
            lines.push(format!("On: {}", self.task));
        }
        if !self.client.is_empty() {
            lines.push(format!("For: {}", self.client));
        }
        lines.join("\n")
    }

    /// Drain change notifications since the last call
    pub fn take_events(&mut self) -> Vec<TrackingEvent> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn assert_predicates_consistent(state: &TrackingState) {
        let e = state.enablement();
        assert_eq!(e.can_start, !state.is_tracking());
        assert_eq!(e.can_abort, state.is_tracking());
        assert_eq!(e.can_stop, state.is_tracking() && state.labels_set());
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = TrackingState::new();
        assert_eq!(state.status(), TrackingStatus::Idle);
        assert_eq!(
            state.enablement(),
            Enablement {
                can_start: true,
                can_set_task: true,
                can_stop: false,
                can_abort: false,
            }
        );
        assert_eq!(state.primary_action(), PrimaryAction::Start);
    }

    #[test]
    fn test_start_twice_is_rejected_without_change() {
        let mut state = TrackingState::new();
        state.start_tracking(t(0)).unwrap();
        state.take_events();

        assert_eq!(state.start_tracking(t(10)), Err(TransitionError::AlreadyTracking));
        assert_eq!(state.start_time(), Some(t(0)));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_stop_without_labels_fails_and_keeps_state() {
        let mut state = TrackingState::new();
        state.start_tracking(t(0)).unwrap();
        assert!(!state.can_stop());
        assert_eq!(state.primary_action(), PrimaryAction::OpenDialog);

        assert_eq!(state.stop_tracking(t(60)), Err(TransitionError::LabelsMissing));
        assert!(state.is_tracking());
        assert_eq!(state.start_time(), Some(t(0)));
    }

    #[test]
    fn test_stop_when_idle_fails() {
        let mut state = TrackingState::new();
        assert_eq!(state.stop_tracking(t(0)), Err(TransitionError::NotTracking));
        assert_eq!(state.abort_tracking(), Err(TransitionError::NotTracking));
    }

    #[test]
    fn test_set_task_while_idle_starts_tracking() {
        let mut state = TrackingState::new();
        let started = state.set_task_and_client("Write report", "Acme", t(0)).unwrap();
        assert!(started);
        assert!(state.is_tracking());
        assert_eq!(state.task(), "Write report");
        assert_eq!(state.client(), "Acme");
        assert_eq!(state.take_events(), vec![TrackingEvent::LabelsChanged, TrackingEvent::Started]);
    }

    #[test]
    fn test_set_task_after_unlabelled_start_keeps_start_time() {
        let mut state = TrackingState::new();
        state.start_tracking(t(0)).unwrap();
        assert!(state.can_set_task());

        let started = state.set_task_and_client("Write report", "Acme", t(30)).unwrap();
        assert!(!started);
        assert_eq!(state.start_time(), Some(t(0)));
        assert!(state.can_stop());
        assert!(!state.can_set_task());
    }

    #[test]
    fn test_labels_locked_while_tracking_labelled_session() {
        let mut state = TrackingState::new();
        state.set_task_and_client("A", "X", t(0)).unwrap();

        let err = state.set_task_and_client("B", "Y", t(5)).unwrap_err();
        assert_eq!(err, TrackingError::Transition(TransitionError::LabelsLocked));
        assert_eq!(state.task(), "A");
        assert_eq!(state.client(), "X");
    }

    #[test]
    fn test_set_task_rejects_blank_labels() {
        let mut state = TrackingState::new();
        let err = state.set_task_and_client("Task", "  ", t(0)).unwrap_err();
        assert!(matches!(err, TrackingError::Validation(_)));
        assert!(!state.is_tracking());
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_stop_produces_interval_and_returns_to_idle() {
        let mut state = TrackingState::new();
        state.start_tracking(t(0)).unwrap();
        state.set_task_and_client("Write report", "Acme", t(0)).unwrap();

        let interval = state.stop_tracking(t(3661)).unwrap();
        assert_eq!(interval.start, t(0));
        assert_eq!(interval.end, t(3661));
        assert_eq!(interval.duration(), Duration::seconds(3661));
        assert_eq!(state.status(), TrackingStatus::Idle);
        // labels stay around for the next session
        assert_eq!(state.task(), "Write report");
        assert_eq!(state.primary_action(), PrimaryAction::Start);
    }

    #[test]
    fn test_stop_at_earlier_end_is_clamped_to_start() {
        let mut state = TrackingState::new();
        state.set_task_and_client("A", "X", t(100)).unwrap();
        let interval = state.stop_tracking_at(t(50)).unwrap();
        assert_eq!(interval.end, t(100));
        assert_eq!(interval.duration(), Duration::zero());
    }

    #[test]
    fn test_abort_produces_nothing() {
        let mut state = TrackingState::new();
        state.start_tracking(t(0)).unwrap();
        state.take_events();

        state.abort_tracking().unwrap();
        assert!(!state.is_tracking());
        assert_eq!(state.take_events(), vec![TrackingEvent::Aborted]);
    }

    #[test]
    fn test_predicates_hold_over_transition_sequence() {
        let mut state = TrackingState::new();
        let mut clock = 0;
        // start, stop, abort, label, start, stop, abort, stop
        for step in 0..24 {
            clock += 7;
            let _ = match step % 4 {
                0 => state.start_tracking(t(clock)).map(|_| ()),
                1 => state.stop_tracking(t(clock)).map(|_| ()),
                2 => state.abort_tracking(),
                _ => state
                    .set_task_and_client("A", "X", t(clock))
                    .map(|_| ())
                    .map_err(|_| TransitionError::LabelsLocked),
            };
            assert_predicates_consistent(&state);
        }
    }

    #[test]
    fn test_elapsed() {
        let mut state = TrackingState::new();
        assert_eq!(state.elapsed(t(100)), Duration::zero());
        state.start_tracking(t(10)).unwrap();
        assert_eq!(state.elapsed(t(100)), Duration::seconds(90));
        assert_eq!(state.elapsed(t(0)), Duration::zero());
    }

    #[test]
    fn test_status_text() {
        let mut state = TrackingState::new();
        assert_eq!(state.status_text(), "Not working");
        state.set_task_and_client("Docs", "Acme", t(0)).unwrap();
        assert_eq!(state.status_text(), "Working\nOn: Docs\nFor: Acme");
    }

    #[test]
    fn test_restore_emits_no_events() {
        let mut state = TrackingState::restore(Some(t(0)), "A".into(), "X".into());
        assert!(state.can_stop());
        assert!(state.take_events().is_empty());
    }
}
