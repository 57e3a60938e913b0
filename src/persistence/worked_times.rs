use super::files::{atomic_write, read_file};
use super::timestamp::{format_timestamp, parse_timestamp};
use crate::domain::{IntervalBackend, WorkedInterval};
use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

/// One completed interval as stored in worked_times.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub start_time: String,
    pub end_time: String,
    pub task: String,
    pub client: String,
}

impl From<&WorkedInterval> for IntervalRecord {
    fn from(interval: &WorkedInterval) -> Self {
        Self {
            start_time: format_timestamp(&interval.start),
            end_time: format_timestamp(&interval.end),
            task: interval.task.clone(),
            client: interval.client.clone(),
        }
    }
}

impl IntervalRecord {
    /// Convert to a domain interval with a fresh identity (not validated here)
    pub fn into_interval(self) -> Result<WorkedInterval, PersistenceError> {
        Ok(WorkedInterval {
            id: Uuid::new_v4(),
            start: parse_timestamp(&self.start_time)?,
            end: parse_timestamp(&self.end_time)?,
            task: self.task,
            client: self.client,
        })
    }
}

/// worked_times.json as a store backend: a JSON array rewritten in full on every save
#[derive(Debug, Clone)]
pub struct WorkedTimesFile {
    path: PathBuf,
}

impl WorkedTimesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IntervalBackend for WorkedTimesFile {
    fn load(&self) -> Result<Vec<WorkedInterval>, PersistenceError> {
        let Some(content) = read_file(&self.path)? else {
            return Ok(Vec::new());
        };
        let records: Vec<IntervalRecord> =
            serde_json::from_str(&content).map_err(|e| PersistenceError::json(&self.path, e))?;

        let mut intervals = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            match record.into_interval() {
                Ok(interval) => intervals.push(interval),
                Err(e) => warn!("Failed to parse worked time #{} in {}: {}", i, self.path.display(), e),
            }
        }
        Ok(intervals)
    }

    fn save(&self, intervals: &[WorkedInterval]) -> Result<(), PersistenceError> {
        let records: Vec<IntervalRecord> = intervals.iter().map(IntervalRecord::from).collect();
        let json =
            serde_json::to_string_pretty(&records).map_err(|e| PersistenceError::json(&self.path, e))?;
        atomic_write(&self.path, &json)
    }
}
