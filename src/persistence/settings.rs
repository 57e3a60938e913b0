use super::files::{atomic_write, read_file};
use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Idle time after which the user is asked what to do with the session
    pub idle_threshold_minutes: u64,
    /// How often the idle probe is consulted while tracking
    pub idle_poll_seconds: u64,
    /// Number of recent task/client pairs offered for quick switching
    pub recent_pairs: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            idle_threshold_minutes: 15,
            idle_poll_seconds: 1,
            recent_pairs: 5,
        }
    }
}

impl Settings {
    pub fn idle_threshold(&self) -> Duration {
        Duration::from_secs(self.idle_threshold_minutes * 60)
    }

    pub fn idle_poll_interval(&self) -> Duration {
        Duration::from_secs(self.idle_poll_seconds.max(1))
    }
}

/// Load settings from settings.json file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, PersistenceError> {
    let path = path.as_ref();

    let Some(content) = read_file(path)? else {
        // If file doesn't exist, return default settings
        return Ok(Settings::default());
    };

    serde_json::from_str(&content).map_err(|e| PersistenceError::json(path, e))
}

/// Save settings to settings.json file
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(settings).map_err(|e| PersistenceError::json(path, e))?;
    atomic_write(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = tempdir().unwrap();
        let settings = load_settings(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.idle_threshold(), Duration::from_secs(15 * 60));
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            idle_threshold_minutes: 5,
            idle_poll_seconds: 2,
            recent_pairs: 8,
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "idle_threshold_minutes": 30 }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.idle_threshold_minutes, 30);
        assert_eq!(settings.recent_pairs, 5);
    }

    #[test]
    fn test_poll_interval_never_zero() {
        let settings = Settings {
            idle_poll_seconds: 0,
            ..Settings::default()
        };
        assert_eq!(settings.idle_poll_interval(), Duration::from_secs(1));
    }
}
