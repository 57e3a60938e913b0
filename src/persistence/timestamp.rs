use crate::error::PersistenceError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Write a timestamp as RFC 3339 with the local offset
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.to_rfc3339()
}

/// Read an ISO-8601 timestamp
///
/// Accepts RFC 3339 (with offset) and naive `YYYY-MM-DDTHH:MM:SS[.f]` values,
/// the latter taken as local time. Hand-edited files tend to contain both.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Local>, PersistenceError> {
    let value = value.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Local));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .ok_or_else(|| PersistenceError::Timestamp(value.to_string()));
        }
    }

    Err(PersistenceError::Timestamp(value.to_string()))
}
