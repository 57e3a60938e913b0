use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// A tracking transition that the current state does not allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("already tracking")]
    AlreadyTracking,

    #[error("not tracking")]
    NotTracking,

    #[error("task and client must both be set before stopping")]
    LabelsMissing,

    #[error("task and client are already set; stop tracking before switching")]
    LabelsLocked,
}

/// A worked interval (or a label pair) that breaks the record invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task must not be empty")]
    EmptyTask,

    #[error("client must not be empty")]
    EmptyClient,

    #[error("end time {end} is before start time {start}")]
    EndBeforeStart { start: String, end: String },
}

/// Reading or writing one of the data files failed
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid timestamp {0:?}")]
    Timestamp(String),
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by the worked time store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("worked interval {0} not found")]
    NotFound(Uuid),

    /// The mutation was applied in memory but could not be written out
    #[error("saved in memory only: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Errors returned by label and tracking operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
