use super::events::{EventQueue, StoreEvent};
use super::filter::IntervalFilter;
use super::interval::{IntervalEdit, WorkedInterval};
use crate::error::{PersistenceError, StoreError};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Where a store reads its intervals from and writes them back to
pub trait IntervalBackend: fmt::Debug {
    fn load(&self) -> Result<Vec<WorkedInterval>, PersistenceError>;

    /// Replace the stored collection with `intervals`
    fn save(&self, intervals: &[WorkedInterval]) -> Result<(), PersistenceError>;
}

/// All recorded worked intervals, kept sorted by start time
///
/// Every mutation is written through to the backend. A failed write leaves the
/// mutation applied in memory and the store dirty, so the next mutation (or an
/// explicit `flush`) writes the whole collection again.
#[derive(Debug, Default)]
pub struct WorkedTimeStore {
    intervals: Vec<WorkedInterval>,
    backend: Option<Box<dyn IntervalBackend>>,
    needs_save: bool,
    events: EventQueue<StoreEvent>,
}

impl WorkedTimeStore {
    /// A store with no backing file
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load a store from `backend`, skipping records that break the invariants
    pub fn open(backend: Box<dyn IntervalBackend>) -> Result<Self, PersistenceError> {
        let loaded = backend.load()?;
        let total = loaded.len();

        let mut intervals: Vec<WorkedInterval> = loaded
            .into_iter()
            .filter(|interval| match interval.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Skipping invalid worked interval ({}): {:?}", e, interval);
                    false
                }
            })
            .collect();
        intervals.sort_by_key(|interval| interval.start);
        debug!("Loaded {} of {} worked intervals", intervals.len(), total);

        let mut events = EventQueue::default();
        events.push(StoreEvent::Loaded);

        Ok(Self {
            intervals,
            backend: Some(backend),
            needs_save: false,
            events,
        })
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Whether the last write failed (or has not happened yet)
    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    /// Every interval, oldest start first
    pub fn all(&self) -> impl DoubleEndedIterator<Item = &WorkedInterval> + ExactSizeIterator + '_ {
        self.intervals.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&WorkedInterval> {
        self.intervals.iter().find(|interval| interval.id == id)
    }

    /// Add a closed interval; returns its identity
    pub fn append(&mut self, interval: WorkedInterval) -> Result<Uuid, StoreError> {
        interval.validate()?;
        let id = interval.id;
        self.insert_sorted(interval);
        self.events.push(StoreEvent::Appended(id));
        self.mark_changed()?;
        Ok(id)
    }

    /// Remove the interval with identity `id`
    pub fn remove(&mut self, id: Uuid) -> Result<WorkedInterval, StoreError> {
        let idx = self.position(id)?;
        let removed = self.intervals.remove(idx);
        self.events.push(StoreEvent::Removed(id));
        self.mark_changed()?;
        Ok(removed)
    }

    /// Apply `edit` to the interval with identity `id`
    ///
    /// The edited interval is validated before anything changes.
    pub fn update(&mut self, id: Uuid, edit: &IntervalEdit) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        let edited = edit.apply_to(&self.intervals[idx]);
        edited.validate()?;

        self.intervals.remove(idx);
        self.insert_sorted(edited);
        self.events.push(StoreEvent::Updated(id));
        self.mark_changed()?;
        Ok(())
    }

    /// Snapshot of the intervals matching `filter`, oldest start first
    ///
    /// The result is owned and does not follow later mutations of the store.
    pub fn subset(&self, filter: &IntervalFilter) -> Vec<WorkedInterval> {
        self.intervals
            .iter()
            .filter(|interval| filter.matches(interval))
            .cloned()
            .collect()
    }

    pub fn distinct_tasks(&self) -> BTreeSet<&str> {
        self.intervals
            .iter()
            .map(|interval| interval.task.as_str())
            .filter(|task| !task.is_empty())
            .collect()
    }

    pub fn distinct_clients(&self) -> BTreeSet<&str> {
        self.intervals
            .iter()
            .map(|interval| interval.client.as_str())
            .filter(|client| !client.is_empty())
            .collect()
    }

    /// Up to `n` distinct (task, client) pairs, most recently started first
    ///
    /// Lazy: the scan stops as soon as `n` pairs have been yielded.
    pub fn most_recent_distinct_pairs(&self, n: usize) -> impl Iterator<Item = (&str, &str)> + '_ {
        let mut seen = HashSet::new();
        self.intervals
            .iter()
            .rev()
            .map(WorkedInterval::pair)
            .filter(move |pair| seen.insert(*pair))
            .take(n)
    }

    /// Write the collection if a previous write is pending
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if !self.needs_save {
            return Ok(());
        }
        if let Some(backend) = &self.backend {
            backend.save(&self.intervals)?;
            debug!("Saved {} worked intervals", self.intervals.len());
        }
        self.needs_save = false;
        Ok(())
    }

    /// Drain change notifications since the last call
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.events.drain()
    }

    fn position(&self, id: Uuid) -> Result<usize, StoreError> {
        self.intervals
            .iter()
            .position(|interval| interval.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn insert_sorted(&mut self, interval: WorkedInterval) {
        // after any interval with the same start, so insertion order breaks ties
        let idx = self.intervals.partition_point(|existing| existing.start <= interval.start);
        self.intervals.insert(idx, interval);
    }

    fn mark_changed(&mut self) -> Result<(), StoreError> {
        self.needs_save = true;
        self.flush().map_err(|e| {
            warn!("Failed to save worked intervals: {}", e);
            StoreError::Persistence(e)
        })
    }
}
