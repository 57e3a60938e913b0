use super::interval::WorkedInterval;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use std::collections::BTreeSet;

/// Constraints for selecting a subset of worked intervals
///
/// A `None` dimension is unconstrained. The start bound is inclusive and the
/// end bound exclusive, both compared against the interval's start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalFilter {
    pub tasks: Option<BTreeSet<String>>,
    pub clients: Option<BTreeSet<String>>,
    pub start_bound: Option<DateTime<Local>>,
    pub end_bound: Option<DateTime<Local>>,
}

impl IntervalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks = Some(tasks.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_clients<I, S>(mut self, clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clients = Some(clients.into_iter().map(Into::into).collect());
        self
    }

    /// Replace both time bounds with those of a calendar window
    pub fn with_window(mut self, window: TimeWindow, now: DateTime<Local>) -> Self {
        let (start, end) = window.bounds(now);
        self.start_bound = start;
        self.end_bound = end;
        self
    }

    pub fn matches(&self, interval: &WorkedInterval) -> bool {
        if let Some(tasks) = &self.tasks {
            if !tasks.contains(&interval.task) {
                return false;
            }
        }
        if let Some(clients) = &self.clients {
            if !clients.contains(&interval.client) {
                return false;
            }
        }
        if let Some(start) = self.start_bound {
            if interval.start < start {
                return false;
            }
        }
        if let Some(end) = self.end_bound {
            if interval.start >= end {
                return false;
            }
        }
        true
    }
}

/// Calendar windows offered by the history browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    All,
    Today,
    ThisWeek,
    ThisMonth,
    LastMonth,
}

impl TimeWindow {
    pub fn all() -> &'static [TimeWindow] {
        &[
            TimeWindow::All,
            TimeWindow::Today,
            TimeWindow::ThisWeek,
            TimeWindow::ThisMonth,
            TimeWindow::LastMonth,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Today => "Today",
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
            Self::LastMonth => "Last Month",
        }
    }

    /// The window after this one, wrapping around
    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|w| w == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// (inclusive start, exclusive end) of the window containing `now`
    pub fn bounds(&self, now: DateTime<Local>) -> (Option<DateTime<Local>>, Option<DateTime<Local>>) {
        let today = now.date_naive();
        match self {
            Self::All => (None, None),
            Self::Today => (local_midnight(today), None),
            Self::ThisWeek => {
                let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (local_midnight(monday), None)
            }
            Self::ThisMonth => (local_midnight(first_of_month(today)), None),
            Self::LastMonth => {
                let this_month = first_of_month(today);
                let last_month = first_of_month(this_month - Duration::days(1));
                (local_midnight(last_month), local_midnight(this_month))
            }
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Start of `date` in local time (earliest instant if midnight is ambiguous)
fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Local.from_local_datetime(&midnight).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn interval(start: DateTime<Local>, task: &str, client: &str) -> WorkedInterval {
        WorkedInterval::new(start, start + Duration::minutes(30), task, client).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = IntervalFilter::new();
        assert!(filter.matches(&interval(local(2024, 1, 1, 9, 0), "A", "X")));
    }

    #[test]
    fn test_label_filters() {
        let filter = IntervalFilter::new().with_tasks(["A", "B"]).with_clients(["X"]);
        assert!(filter.matches(&interval(local(2024, 1, 1, 9, 0), "A", "X")));
        assert!(filter.matches(&interval(local(2024, 1, 1, 9, 0), "B", "X")));
        assert!(!filter.matches(&interval(local(2024, 1, 1, 9, 0), "C", "X")));
        assert!(!filter.matches(&interval(local(2024, 1, 1, 9, 0), "A", "Y")));
    }

    #[test]
    fn test_empty_label_set_matches_nothing() {
        let filter = IntervalFilter::new().with_tasks(Vec::<String>::new());
        assert!(!filter.matches(&interval(local(2024, 1, 1, 9, 0), "A", "X")));
    }

    #[test]
    fn test_bounds_are_inclusive_then_exclusive() {
        let lower = local(2024, 1, 1, 9, 0);
        let upper = local(2024, 1, 1, 12, 0);
        let filter = IntervalFilter {
            start_bound: Some(lower),
            end_bound: Some(upper),
            ..IntervalFilter::default()
        };

        assert!(filter.matches(&interval(lower, "A", "X")));
        assert!(!filter.matches(&interval(lower - Duration::seconds(1), "A", "X")));
        assert!(filter.matches(&interval(upper - Duration::seconds(1), "A", "X")));
        assert!(!filter.matches(&interval(upper, "A", "X")));
    }

    #[test]
    fn test_today_window() {
        let now = local(2024, 3, 13, 15, 30);
        let (start, end) = TimeWindow::Today.bounds(now);
        assert_eq!(start, Some(local(2024, 3, 13, 0, 0)));
        assert_eq!(end, None);
    }

    #[test]
    fn test_this_week_starts_monday() {
        // 2024-03-13 is a Wednesday
        let now = local(2024, 3, 13, 15, 30);
        let (start, _) = TimeWindow::ThisWeek.bounds(now);
        assert_eq!(start, Some(local(2024, 3, 11, 0, 0)));

        let monday = local(2024, 3, 11, 8, 0);
        assert_eq!(TimeWindow::ThisWeek.bounds(monday).0, Some(local(2024, 3, 11, 0, 0)));
    }

    #[test]
    fn test_month_windows() {
        let now = local(2024, 3, 13, 15, 30);
        assert_eq!(TimeWindow::ThisMonth.bounds(now), (Some(local(2024, 3, 1, 0, 0)), None));
        assert_eq!(
            TimeWindow::LastMonth.bounds(now),
            (Some(local(2024, 2, 1, 0, 0)), Some(local(2024, 3, 1, 0, 0)))
        );

        // January wraps to December of the previous year
        let january = local(2024, 1, 20, 10, 0);
        assert_eq!(
            TimeWindow::LastMonth.bounds(january),
            (Some(local(2023, 12, 1, 0, 0)), Some(local(2024, 1, 1, 0, 0)))
        );
    }

    #[test]
    fn test_window_cycle() {
        let mut window = TimeWindow::All;
        for _ in 0..TimeWindow::all().len() {
            window = window.next();
        }
        assert_eq!(window, TimeWindow::All);
        assert_eq!(TimeWindow::All.next(), TimeWindow::Today);
    }
}
