//! View window navigation.
//!
//! The scheduler is always centered on a reference date and shows one of
//! three granularities. Stepping moves the reference by whole units of the
//! active view: months re-derive the first of the adjacent month, weeks move
//! from the start of the current week, days move one day.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::grid::{first_of_month, month_grid, start_of_week, week_days};

/// Grid granularity of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Day => write!(f, "day"),
            ViewMode::Week => write!(f, "week"),
            ViewMode::Month => write!(f, "month"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            other => Err(ScheduleError::invalid(
                "view",
                format!("'{}' is not a view (day, week, month)", other),
            )),
        }
    }
}

/// The scheduler's visible window: a view mode and the date it centers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub reference: NaiveDate,
    pub week_start: Weekday,
}

impl ViewState {
    pub fn new(mode: ViewMode, reference: NaiveDate, week_start: Weekday) -> Self {
        ViewState {
            mode,
            reference,
            week_start,
        }
    }

    /// Advance the window one unit forward.
    pub fn next(&mut self) {
        self.advance(1);
    }

    /// Move the window one unit back.
    pub fn prev(&mut self) {
        self.advance(-1);
    }

    /// Move the window `steps` units (negative for backwards).
    pub fn advance(&mut self, steps: i32) {
        if steps == 0 {
            return;
        }
        self.reference = match self.mode {
            ViewMode::Month => shift_months(first_of_month(self.reference), steps),
            ViewMode::Week => {
                start_of_week(self.reference, self.week_start) + Duration::days(7 * steps as i64)
            }
            ViewMode::Day => self.reference + Duration::days(steps as i64),
        };
    }

    /// Reset the window onto `today`, whatever the mode.
    pub fn today(&mut self, today: NaiveDate) {
        self.reference = today;
    }

    /// The days the window currently covers: the month matrix, the week,
    /// or the single reference day.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        match self.mode {
            ViewMode::Month => month_grid(self.reference, self.week_start),
            ViewMode::Week => week_days(self.reference, self.week_start),
            ViewMode::Day => vec![self.reference],
        }
    }
}

fn shift_months(date: NaiveDate, steps: i32) -> NaiveDate {
    if steps >= 0 {
        date + Months::new(steps as u32)
    } else {
        date - Months::new((-steps) as u32)
    }
}
