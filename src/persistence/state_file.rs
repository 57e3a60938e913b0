use super::files::{atomic_write, read_file};
use super::timestamp::{format_timestamp, parse_timestamp};
use crate::domain::TrackingState;
use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The tracking session as stored in state.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub start_time: Option<String>,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub client: String,
}

impl From<&TrackingState> for TrackingRecord {
    fn from(state: &TrackingState) -> Self {
        Self {
            start_time: state.start_time().as_ref().map(format_timestamp),
            task: state.task().to_string(),
            client: state.client().to_string(),
        }
    }
}

impl TrackingRecord {
    pub fn into_state(self) -> Result<TrackingState, PersistenceError> {
        let start_time = self.start_time.as_deref().map(parse_timestamp).transpose()?;
        Ok(TrackingState::restore(start_time, self.task, self.client))
    }
}

/// Load the tracking session; a missing file is a fresh idle state
pub fn load_tracking_state<P: AsRef<Path>>(path: P) -> Result<TrackingState, PersistenceError> {
    let path = path.as_ref();
    let Some(content) = read_file(path)? else {
        return Ok(TrackingState::new());
    };
    let record: TrackingRecord =
        serde_json::from_str(&content).map_err(|e| PersistenceError::json(path, e))?;
    record.into_state()
}

/// Save the tracking session, replacing the previous file
pub fn save_tracking_state<P: AsRef<Path>>(path: P, state: &TrackingState) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&TrackingRecord::from(state))
        .map_err(|e| PersistenceError::json(path, e))?;
    atomic_write(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_state() {
        let temp_dir = tempdir().unwrap();
        let state = load_tracking_state(temp_dir.path().join("state.json")).unwrap();
        assert!(!state.is_tracking());
        assert_eq!(state.task(), "");
    }

    #[test]
    fn test_save_and_load_open_session() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let start = Local.with_ymd_and_hms(2024, 5, 6, 9, 30, 0).unwrap();

        let mut state = TrackingState::new();
        state.set_task_and_client("Docs", "Acme", start).unwrap();
        save_tracking_state(&path, &state).unwrap();

        let loaded = load_tracking_state(&path).unwrap();
        assert_eq!(loaded.start_time(), Some(start));
        assert_eq!(loaded.task(), "Docs");
        assert_eq!(loaded.client(), "Acme");
        assert!(loaded.can_stop());
    }

    #[test]
    fn test_idle_state_writes_null_start() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        save_tracking_state(&path, &TrackingState::new()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["start_time"], serde_json::Value::Null);
        assert_eq!(value["task"], "");
        assert_eq!(value["client"], "");
    }

    #[test]
    fn test_load_hand_written_state() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{ "start_time": "2024-05-06T09:30:00", "task": "", "client": "Acme" }"#,
        )
        .unwrap();

        let loaded = load_tracking_state(&path).unwrap();
        assert!(loaded.is_tracking());
        assert!(!loaded.can_stop());
        assert_eq!(loaded.client(), "Acme");
    }

    #[test]
    fn test_load_corrupt_state_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_tracking_state(&path), Err(PersistenceError::Json { .. })));
    }
}
