//! Recurring session expansion.
//!
//! A `Recurrence` is the structured repeat rule attached to a session
//! (frequency, interval, optional weekdays and end date). For display it is
//! compiled to an iCalendar RRULE string and expanded with the `rrule` crate
//! into concrete instances within a date range, each preserving the master's
//! duration.

use chrono::{Duration, NaiveDateTime, Utc};
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::session::Session;

/// How often a recurring session repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// A repeat rule, e.g. "every 2 weeks on Monday and Wednesday until Dec 1".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: Frequency,
    /// Every `interval` periods (1 = every period)
    pub interval: u32,
    /// ISO weekday numbers, 1 = Monday .. 7 = Sunday
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<u8>,
    /// When the repetition stops; None repeats indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDateTime>,
}

impl Recurrence {
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.interval == 0 {
            return Err(ScheduleError::invalid(
                "recurrence",
                "interval must be at least 1",
            ));
        }
        if let Some(bad) = self.days_of_week.iter().find(|d| !(1..=7).contains(*d)) {
            return Err(ScheduleError::invalid(
                "recurrence",
                format!("weekday {} is out of range (1 = Monday .. 7 = Sunday)", bad),
            ));
        }
        Ok(())
    }

    /// Compile to an RRULE value string, e.g.
    /// `FREQ=WEEKLY;INTERVAL=1;BYDAY=SA;UNTIL=20241201T235959Z`.
    pub fn to_rrule(&self) -> String {
        let freq = match self.frequency {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        };

        let mut parts = vec![format!("FREQ={}", freq), format!("INTERVAL={}", self.interval)];

        if !self.days_of_week.is_empty() {
            let days: Vec<&str> = self.days_of_week.iter().map(|d| byday_code(*d)).collect();
            parts.push(format!("BYDAY={}", days.join(",")));
        }

        if let Some(until) = self.until {
            parts.push(format!("UNTIL={}", until.format("%Y%m%dT%H%M%SZ")));
        }

        parts.join(";")
    }
}

fn byday_code(iso_day: u8) -> &'static str {
    match iso_day {
        1 => "MO",
        2 => "TU",
        3 => "WE",
        4 => "TH",
        5 => "FR",
        6 => "SA",
        _ => "SU",
    }
}

/// Build the full iCalendar snippet the rrule parser expects.
///
/// Session times are wall-clock, so they are formatted as UTC instants for
/// the parser and read back naive on the way out.
fn build_rrule_string(start: NaiveDateTime, recurrence: &Recurrence) -> String {
    format!(
        "DTSTART:{}Z\nRRULE:{}",
        start.format("%Y%m%dT%H%M%S"),
        recurrence.to_rrule()
    )
}

/// Maximum instances generated per master in one expansion.
const EXPANSION_LIMIT: u16 = 365;

/// Expand a recurring master session into instances within
/// `[range_start, range_end]` (inclusive).
///
/// The master itself is not included; instances carry the master's id and
/// fields with shifted start/end and `recurrence: None`. A session without
/// a recurrence rule expands to nothing.
pub fn expand_recurring_session(
    master: &Session,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
) -> ScheduleResult<Vec<Session>> {
    let recurrence = match &master.recurrence {
        Some(r) => r,
        None => return Ok(Vec::new()),
    };

    let rrule_str = build_rrule_string(master.start, recurrence);

    let rrule_set: RRuleSet = rrule_str.parse().map_err(|e| {
        ScheduleError::Recurrence(format!(
            "Failed to parse repeat rule for session '{}': {}",
            master.id, e
        ))
    })?;

    // Shift boundaries by 1 second so the range is inclusive (after/before
    // are exclusive in the rrule crate).
    let tz: rrule::Tz = Utc.into();
    let after = (range_start.and_utc() - Duration::seconds(1)).with_timezone(&tz);
    let before = (range_end.and_utc() + Duration::seconds(1)).with_timezone(&tz);

    let result = rrule_set.after(after).before(before).all(EXPANSION_LIMIT);

    let duration = master.duration();
    let mut instances = Vec::new();

    for occurrence in &result.dates {
        let start = occurrence.with_timezone(&Utc).naive_utc();
        instances.push(Session {
            start,
            end: start + duration,
            recurrence: None,
            ..master.clone()
        });
    }

    Ok(instances)
}
