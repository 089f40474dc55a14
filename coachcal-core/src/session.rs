//! The session data model.
//!
//! A `Session` is one scheduled coaching occurrence: who teaches it, when it
//! runs, where it happens (a room or a meeting link), and how it is displayed.
//! Times are wall-clock (`NaiveDateTime`); the scheduler has no timezone
//! handling, a session at 09:00 is at 09:00 wherever it is rendered.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::recurrence::Recurrence;

/// A scheduled coaching session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    /// Activity category, e.g. "chess", "scrabble", "coding"
    pub activity: String,
    pub instructor: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Physical location; None for online sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub mode: SessionMode,
    pub group: GroupMode,
    pub participants: u32,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Meeting link; only meaningful for online sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Display color tag, carried verbatim (e.g. an HSL triple)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

/// Where a session takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Physical,
    Online,
}

/// Whether a session is one-on-one or a group class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    Individual,
    Group,
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl Session {
    /// Total scheduled duration.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Day-bucket membership: a session belongs to the calendar day its
    /// start falls on, and no other.
    pub fn starts_on(&self, day: NaiveDate) -> bool {
        self.start.date() == day
    }

    /// The drag-to-reschedule contract: move the session to `day`, keeping
    /// the original time-of-day and duration.
    pub fn rescheduled_to(&self, day: NaiveDate) -> Session {
        let duration = self.duration();
        let new_start = day.and_time(self.start.time());
        Session {
            start: new_start,
            end: new_start + duration,
            ..self.clone()
        }
    }

    /// Check the model invariants. Called on every store mutation.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.end <= self.start {
            return Err(ScheduleError::invalid(
                "end",
                format!("end time {} is not after start time {}", self.end, self.start),
            ));
        }
        match self.mode {
            SessionMode::Online => {
                if self.location.is_some() {
                    return Err(ScheduleError::invalid(
                        "location",
                        "online sessions cannot have a physical location",
                    ));
                }
            }
            SessionMode::Physical => {
                if self.location.is_none() {
                    return Err(ScheduleError::invalid(
                        "location",
                        "physical sessions need a location",
                    ));
                }
                if self.link.is_some() {
                    return Err(ScheduleError::invalid(
                        "link",
                        "physical sessions cannot have a meeting link",
                    ));
                }
            }
        }
        if let Some(recurrence) = &self.recurrence {
            recurrence.validate()?;
        }
        Ok(())
    }

    /// Start-of-day / end-of-day bounds used when a session runs all day.
    pub fn all_day_bounds(day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (
            day.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
            day.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap()),
        )
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Physical => write!(f, "physical"),
            SessionMode::Online => write!(f, "online"),
        }
    }
}

impl FromStr for SessionMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "physical" | "in-person" => Ok(SessionMode::Physical),
            "online" => Ok(SessionMode::Online),
            other => Err(ScheduleError::invalid(
                "mode",
                format!("'{}' is not a session mode (physical, online)", other),
            )),
        }
    }
}

impl fmt::Display for GroupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupMode::Individual => write!(f, "individual"),
            GroupMode::Group => write!(f, "group"),
        }
    }
}

impl FromStr for GroupMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(GroupMode::Individual),
            "group" => Ok(GroupMode::Group),
            other => Err(ScheduleError::invalid(
                "group",
                format!("'{}' is not a group type (individual, group)", other),
            )),
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Pending => write!(f, "pending"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for SessionStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SessionStatus::Pending),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            other => Err(ScheduleError::invalid(
                "status",
                format!("'{}' is not a status (pending, completed, cancelled)", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_test_session() -> Session {
        Session {
            id: "test-session-123".to_string(),
            title: "Chess Endgame Practice".to_string(),
            activity: "chess".to_string(),
            instructor: "Michael Brown".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 11, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 11, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            location: Some("Room 101".to_string()),
            mode: SessionMode::Physical,
            group: GroupMode::Individual,
            participants: 1,
            status: SessionStatus::Pending,
            all_day: false,
            description: None,
            notes: None,
            link: None,
            color: None,
            recurrence: None,
        }
    }

    #[test]
    fn starts_on_own_day_only() {
        let session = make_test_session();
        assert!(session.starts_on(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()));
        assert!(!session.starts_on(NaiveDate::from_ymd_opt(2024, 11, 2).unwrap()));
        assert!(!session.starts_on(NaiveDate::from_ymd_opt(2024, 10, 31).unwrap()));
    }

    #[test]
    fn reschedule_preserves_time_of_day_and_duration() {
        let session = make_test_session();
        let moved = session.rescheduled_to(NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());

        assert_eq!(
            moved.start,
            NaiveDate::from_ymd_opt(2024, 11, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        );
        assert_eq!(
            moved.end,
            NaiveDate::from_ymd_opt(2024, 11, 5)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(moved.duration(), session.duration());
    }

    #[test]
    fn reschedule_keeps_duration_across_midnight() {
        let mut session = make_test_session();
        session.start = NaiveDate::from_ymd_opt(2024, 11, 1)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        session.end = NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();

        let moved = session.rescheduled_to(NaiveDate::from_ymd_opt(2024, 11, 10).unwrap());
        assert_eq!(moved.duration(), Duration::minutes(150));
        assert_eq!(
            moved.end,
            NaiveDate::from_ymd_opt(2024, 11, 11)
                .unwrap()
                .and_hms_opt(1, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn validate_rejects_end_before_start() {
        let mut session = make_test_session();
        session.end = session.start - Duration::minutes(30);
        assert!(session.validate().is_err());

        session.end = session.start;
        assert!(session.validate().is_err());
    }

    #[test]
    fn validate_online_rejects_location() {
        let mut session = make_test_session();
        session.mode = SessionMode::Online;
        // location still set from the physical fixture
        assert!(session.validate().is_err());

        session.location = None;
        session.link = Some("https://zoom.us/j/123456789".to_string());
        assert!(session.validate().is_ok());
    }

    #[test]
    fn validate_physical_requires_location_and_no_link() {
        let mut session = make_test_session();
        session.location = None;
        assert!(session.validate().is_err());

        session.location = Some("Lab A".to_string());
        session.link = Some("https://meet.example.com/xyz".to_string());
        assert!(session.validate().is_err());
    }

    #[test]
    fn mode_and_status_round_trip_from_str() {
        assert_eq!("online".parse::<SessionMode>().unwrap(), SessionMode::Online);
        assert_eq!("Physical".parse::<SessionMode>().unwrap(), SessionMode::Physical);
        assert_eq!("group".parse::<GroupMode>().unwrap(), GroupMode::Group);
        assert_eq!(
            "cancelled".parse::<SessionStatus>().unwrap(),
            SessionStatus::Cancelled
        );
        assert!("hybrid".parse::<SessionMode>().is_err());
    }
}
