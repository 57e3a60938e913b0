use crate::error::ValidationError;
use chrono::{DateTime, Duration, Local};
use uuid::Uuid;

/// A closed stretch of work on a task for a client
#[derive(Debug, Clone)]
pub struct WorkedInterval {
    /// Process-local identity (not persisted, regenerated on load)
    pub id: Uuid,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub task: String,
    pub client: String,
}

impl WorkedInterval {
    /// Build a validated interval with a fresh identity
    pub fn new(
        start: DateTime<Local>,
        end: DateTime<Local>,
        task: impl Into<String>,
        client: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let interval = Self {
            id: Uuid::new_v4(),
            start,
            end,
            task: task.into(),
            client: client.into(),
        };
        interval.validate()?;
        Ok(interval)
    }

    /// Check the invariants every stored interval must hold
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_labels(&self.task, &self.client)?;
        if self.end < self.start {
            return Err(ValidationError::EndBeforeStart {
                start: self.start.to_rfc3339(),
                end: self.end.to_rfc3339(),
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// The (task, client) pair this interval was worked on
    pub fn pair(&self) -> (&str, &str) {
        (&self.task, &self.client)
    }
}

/// Equality compares the recorded fields, not the process-local identity
impl PartialEq for WorkedInterval {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.task == other.task
            && self.client == other.client
    }
}

impl Eq for WorkedInterval {}

/// Both labels must be non-empty once trimmed
pub fn validate_labels(task: &str, client: &str) -> Result<(), ValidationError> {
    if task.trim().is_empty() {
        return Err(ValidationError::EmptyTask);
    }
    if client.trim().is_empty() {
        return Err(ValidationError::EmptyClient);
    }
    Ok(())
}

/// Edit applied to a stored interval; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct IntervalEdit {
    pub task: Option<String>,
    pub client: Option<String>,
    pub start: Option<DateTime<Local>>,
    pub end: Option<DateTime<Local>>,
}

impl IntervalEdit {
    /// Produce the edited copy of `interval`, keeping its identity
    pub fn apply_to(&self, interval: &WorkedInterval) -> WorkedInterval {
        WorkedInterval {
            id: interval.id,
            start: self.start.unwrap_or(interval.start),
            end: self.end.unwrap_or(interval.end),
            task: self
                .task
                .as_deref()
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| interval.task.clone()),
            client: self
                .client
                .as_deref()
                .map(|c| c.trim().to_string())
                .unwrap_or_else(|| interval.client.clone()),
        }
    }
}
