use super::interval::WorkedInterval;
use uuid::Uuid;

/// Change notification emitted by `TrackingState`
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    Started,
    LabelsChanged,
    /// Tracking closed and produced this interval
    Stopped(WorkedInterval),
    Aborted,
}

/// Change notification emitted by `WorkedTimeStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded,
    Appended(Uuid),
    Removed(Uuid),
    Updated(Uuid),
}

/// Pending change notifications, drained by whoever renders or persists
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    pending: Vec<E>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<E> EventQueue<E> {
    pub fn push(&mut self, event: E) {
        self.pending.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
