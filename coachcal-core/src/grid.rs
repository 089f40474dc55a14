//! Calendar grid derivation and day buckets.
//!
//! The month view is a 7-column matrix covering whole weeks from the week of
//! the 1st through the week of the last day of the month. Sessions bucket
//! into cells by start day; crowded cells keep a configurable number of
//! visible entries and report the rest as a hidden count ("+N sessions").

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use crate::session::Session;

/// First day of `date`'s week for the given week start.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % 7;
    date - Duration::days(offset as i64)
}

/// Last day of `date`'s week for the given week start.
pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    start_of_week(date, week_start) + Duration::days(6)
}

/// The 1st of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

/// The last day of `date`'s month.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Months::new(1) - Duration::days(1)
}

/// Every day shown in the month view for `reference`:
/// `start_of_week(1st) ..= end_of_week(last)`. Always a multiple of 7.
pub fn month_grid(reference: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let first = start_of_week(first_of_month(reference), week_start);
    let last = end_of_week(last_of_month(reference), week_start);

    let mut days = Vec::new();
    let mut day = first;
    while day <= last {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// The 7 days of `reference`'s week.
pub fn week_days(reference: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let first = start_of_week(reference, week_start);
    (0..7).map(|i| first + Duration::days(i)).collect()
}

/// One cell of a calendar grid: the sessions starting that day, sorted by
/// start time, split into a visible prefix and a hidden remainder.
#[derive(Debug)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// Whether the cell belongs to the displayed month (month view shows
    /// leading/trailing days of the neighbor months dimmed)
    pub in_month: bool,
    pub visible: Vec<&'a Session>,
    /// Sessions beyond the visible cap ("+N sessions")
    pub hidden: usize,
}

impl DayCell<'_> {
    pub fn total(&self) -> usize {
        self.visible.len() + self.hidden
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.hidden == 0
    }
}

/// All sessions starting on `day`, sorted by start time.
pub fn sessions_on<'a>(sessions: &'a [Session], day: NaiveDate) -> Vec<&'a Session> {
    let mut matched: Vec<&Session> = sessions.iter().filter(|s| s.starts_on(day)).collect();
    matched.sort_by_key(|s| s.start);
    matched
}

/// Bucket `sessions` into cells for `days`.
///
/// `max_visible` caps how many entries a cell lists before collapsing the
/// rest into a hidden count. This is a display policy, not a scheduling
/// limit; it comes from configuration.
pub fn day_cells<'a>(
    days: &[NaiveDate],
    sessions: &'a [Session],
    reference: NaiveDate,
    max_visible: usize,
) -> Vec<DayCell<'a>> {
    days.iter()
        .map(|&date| {
            let mut visible = sessions_on(sessions, date);
            let total = visible.len();
            let hidden = if total > max_visible {
                visible.truncate(max_visible);
                total - max_visible
            } else {
                0
            };

            DayCell {
                date,
                in_month: date.month() == reference.month() && date.year() == reference.year(),
                visible,
                hidden,
            }
        })
        .collect()
}
