//! Date range for listing sessions.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Agenda listings default to this many days ahead of the reference day.
pub const DEFAULT_AGENDA_DAYS: i64 = 30;

/// Inclusive range over session start times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateRange {
    /// Parse user-supplied bounds around a reference day.
    /// - `from`: YYYY-MM-DD, defaults to the reference day
    /// - `to`: YYYY-MM-DD, defaults to reference + DEFAULT_AGENDA_DAYS
    pub fn from_args(
        from: Option<&str>,
        to: Option<&str>,
        reference: NaiveDate,
    ) -> Result<Self, String> {
        let from_dt = match from {
            Some(s) => parse_date_start(s)?,
            None => start_of_day(reference),
        };

        let to_dt = match to {
            Some(s) => parse_date_end(s)?,
            None => end_of_day(reference + Duration::days(DEFAULT_AGENDA_DAYS)),
        };

        if to_dt < from_dt {
            return Err(format!("Range end {} is before start {}", to_dt, from_dt));
        }

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// The whole of one calendar day.
    pub fn single_day(day: NaiveDate) -> Self {
        DateRange {
            from: start_of_day(day),
            to: end_of_day(day),
        }
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.from && instant <= self.to
    }
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(0, 0, 0).unwrap()
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(23, 59, 59).unwrap()
}

/// Parse YYYY-MM-DD as start of day
fn parse_date_start(s: &str) -> Result<NaiveDateTime, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(start_of_day(date))
}

/// Parse YYYY-MM-DD as end of day
fn parse_date_end(s: &str) -> Result<NaiveDateTime, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(end_of_day(date))
}
