use crate::error::PersistenceError;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Application directory name under the per-user data directory
pub const APP_DIR_NAME: &str = "Wage Labor Record";

/// Paths of everything the application keeps on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The per-user data directory for this platform
    /// (`$XDG_DATA_HOME` or `~/.local/share` on Linux, `Application Support` on macOS,
    /// `%LOCALAPPDATA%` on Windows)
    pub fn platform_default() -> Result<Self> {
        let base = dirs::data_local_dir().context("Could not determine user data directory")?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it doesn't exist yet
    pub fn ensure(&self) -> Result<&Self> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .with_context(|| format!("Failed to create directory: {}", self.root.display()))?;
        }
        Ok(self)
    }

    /// The open tracking session (`state.json`)
    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.json")
    }

    /// Completed intervals (`worked_times.json`)
    pub fn worked_times_file(&self) -> PathBuf {
        self.root.join("worked_times.json")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

/// Atomically write content to a file using temp file + rename
///
/// The previous file stays intact if any step fails.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    // Create temp file in the same directory
    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| PersistenceError::io(dir, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| PersistenceError::io(temp_file.path().to_path_buf(), e))?;

    // Sync to disk
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| PersistenceError::io(temp_file.path().to_path_buf(), e))?;

    // Atomically rename temp file to target
    temp_file
        .persist(path)
        .map_err(|e| PersistenceError::io(path, e.error))?;

    Ok(())
}

/// Read file content, `None` if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>, PersistenceError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PersistenceError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_paths() {
        let dir = DataDir::new("/data/wlr");
        assert_eq!(dir.state_file(), PathBuf::from("/data/wlr/state.json"));
        assert_eq!(dir.worked_times_file(), PathBuf::from("/data/wlr/worked_times.json"));
        assert_eq!(dir.settings_file(), PathBuf::from("/data/wlr/settings.json"));
        assert_eq!(dir.logs_dir(), PathBuf::from("/data/wlr/logs"));
    }

    #[test]
    fn test_ensure_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp_dir.path().join("nested").join("wlr"));
        dir.ensure().unwrap();
        assert!(dir.root().is_dir());
        // idempotent
        dir.ensure().unwrap();
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "[]").unwrap();
        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("[]"));

        // overwrite replaces the whole content
        atomic_write(&test_file, "{}").unwrap();
        assert_eq!(read_file(&test_file).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("nonexistent.json");
        assert_eq!(read_file(&test_file).unwrap(), None);
    }

    #[test]
    fn test_atomic_write_into_missing_directory_fails_cleanly() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("missing").join("test.json");
        let err = atomic_write(&test_file, "[]").unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        assert!(!test_file.exists());
    }
}
