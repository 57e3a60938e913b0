use super::interval::WorkedInterval;
use chrono::{DateTime, Datelike, Duration, Local};
use std::collections::BTreeMap;

/// Worked time totals over a set of intervals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub by_task: BTreeMap<String, Duration>,
    pub grand_total: Duration,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            by_task: BTreeMap::new(),
            grand_total: Duration::zero(),
        }
    }
}

impl Summary {
    /// "task, HH:MM:SS" per line, ready to paste into an invoice or sheet
    pub fn to_text(&self) -> String {
        self.by_task
            .iter()
            .map(|(task, duration)| format!("{}, {}", task, format_duration(*duration, true)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Sum durations per task and overall
pub fn summarize<'a, I>(intervals: I) -> Summary
where
    I: IntoIterator<Item = &'a WorkedInterval>,
{
    let mut summary = Summary::default();
    for interval in intervals {
        let duration = interval.duration();
        let entry = summary
            .by_task
            .entry(interval.task.clone())
            .or_insert_with(Duration::zero);
        *entry = *entry + duration;
        summary.grand_total = summary.grand_total + duration;
    }
    summary
}

/// Format a duration as zero-padded "HH:MM:SS" (or "HH:MM")
pub fn format_duration(duration: Duration, include_seconds: bool) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if include_seconds {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", hours, minutes)
    }
}

/// How much of a start timestamp a list needs to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartFormat {
    SameDay,
    SameMonth,
    SameYear,
    Full,
}

impl StartFormat {
    /// Pick the most compact format that is still unambiguous for `intervals`
    pub fn for_intervals(intervals: &[WorkedInterval]) -> Self {
        let Some(first) = intervals.first() else {
            return Self::Full;
        };
        let first = first.start;
        let same_year = intervals.iter().all(|i| i.start.year() == first.year());
        let same_month = same_year && intervals.iter().all(|i| i.start.month() == first.month());
        let same_day = same_month && intervals.iter().all(|i| i.start.day() == first.day());

        if same_day {
            Self::SameDay
        } else if same_month {
            Self::SameMonth
        } else if same_year {
            Self::SameYear
        } else {
            Self::Full
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Self::SameDay => "%H:%M",
            Self::SameMonth => "%d %H:%M",
            Self::SameYear => "%b %d %H:%M",
            Self::Full => "%Y-%m-%d %H:%M",
        }
    }

    pub fn format(&self, time: DateTime<Local>) -> String {
        time.format(self.pattern()).to_string()
    }
}

/// End time label, compacted relative to the interval's own start
pub fn end_label(interval: &WorkedInterval) -> String {
    let (start, end) = (interval.start, interval.end);
    let format = if end.year() != start.year() {
        StartFormat::Full
    } else if end.month() != start.month() {
        StartFormat::SameYear
    } else if end.day() != start.day() {
        StartFormat::SameMonth
    } else {
        StartFormat::SameDay
    };
    format.format(end)
}

/// First candidate (in order) extending `prefix`, ignoring case
///
/// An empty prefix or an exact match yields nothing to complete.
pub fn complete<'a, I>(prefix: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    if prefix.is_empty() {
        return None;
    }
    let needle = prefix.to_lowercase();
    candidates
        .into_iter()
        .find(|candidate| candidate.to_lowercase().starts_with(&needle) && candidate.len() > prefix.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn worked(start: DateTime<Local>, mins: i64, task: &str) -> WorkedInterval {
        WorkedInterval::new(start, start + Duration::minutes(mins), task, "Acme").unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(3661), true), "01:01:01");
        assert_eq!(format_duration(Duration::seconds(3661), false), "01:01");
        assert_eq!(format_duration(Duration::zero(), true), "00:00:00");
        assert_eq!(format_duration(Duration::hours(123) + Duration::seconds(5), true), "123:00:05");
    }

    #[test]
    fn test_summarize_by_task() {
        let day = local(2024, 4, 2, 9, 0);
        let intervals = vec![
            worked(day, 30, "Docs"),
            worked(day + Duration::hours(1), 45, "Review"),
            worked(day + Duration::hours(2), 30, "Docs"),
        ];
        let summary = summarize(&intervals);

        assert_eq!(summary.by_task.get("Docs"), Some(&Duration::minutes(60)));
        assert_eq!(summary.by_task.get("Review"), Some(&Duration::minutes(45)));
        assert_eq!(summary.grand_total, Duration::minutes(105));
        assert_eq!(summary.to_text(), "Docs, 01:00:00\nReview, 00:45:00");
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&Vec::<WorkedInterval>::new());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.to_text(), "");
    }

    #[test]
    fn test_start_format_compaction() {
        let same_day = vec![worked(local(2024, 4, 2, 9, 0), 5, "a"), worked(local(2024, 4, 2, 17, 0), 5, "b")];
        assert_eq!(StartFormat::for_intervals(&same_day), StartFormat::SameDay);
        assert_eq!(StartFormat::SameDay.format(local(2024, 4, 2, 9, 5)), "09:05");

        let same_month = vec![worked(local(2024, 4, 2, 9, 0), 5, "a"), worked(local(2024, 4, 9, 9, 0), 5, "b")];
        assert_eq!(StartFormat::for_intervals(&same_month), StartFormat::SameMonth);

        let same_year = vec![worked(local(2024, 4, 2, 9, 0), 5, "a"), worked(local(2024, 6, 2, 9, 0), 5, "b")];
        assert_eq!(StartFormat::for_intervals(&same_year), StartFormat::SameYear);
        assert_eq!(StartFormat::SameYear.format(local(2024, 6, 2, 9, 0)), "Jun 02 09:00");

        let spread = vec![worked(local(2023, 4, 2, 9, 0), 5, "a"), worked(local(2024, 4, 2, 9, 0), 5, "b")];
        assert_eq!(StartFormat::for_intervals(&spread), StartFormat::Full);
        assert_eq!(StartFormat::for_intervals(&[]), StartFormat::Full);
    }

    #[test]
    fn test_end_label_relative_to_start() {
        let interval = worked(local(2024, 4, 2, 9, 0), 90, "a");
        assert_eq!(end_label(&interval), "10:30");

        let overnight = worked(local(2024, 4, 2, 23, 0), 120, "a");
        assert_eq!(end_label(&overnight), "03 01:00");
    }

    #[test]
    fn test_complete() {
        let candidates = ["Acme", "Globex", "acorn"];
        assert_eq!(complete("ac", candidates), Some("Acme"));
        assert_eq!(complete("Glo", candidates), Some("Globex"));
        assert_eq!(complete("Acme", candidates), None);
        assert_eq!(complete("", candidates), None);
        assert_eq!(complete("zz", candidates), None);
    }
}
