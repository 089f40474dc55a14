//! New-session drafts and their validation.
//!
//! A `SessionDraft` holds raw form input. `build` checks the field
//! constraints (title length, description length, required selections) and
//! the model invariants, then mints a `Session` with a fresh id. Invalid
//! input is reported against the offending field and blocks creation;
//! nothing retries.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};
use crate::recurrence::Recurrence;
use crate::session::{GroupMode, Session, SessionMode, SessionStatus};

pub const TITLE_MIN: usize = 2;
pub const TITLE_MAX: usize = 50;
pub const DESCRIPTION_MIN: usize = 6;

/// Raw input for a new session.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    pub title: String,
    pub activity: String,
    pub instructor: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub mode: SessionMode,
    pub group: GroupMode,
    pub location: Option<String>,
    pub link: Option<String>,
    pub participants: u32,
    pub all_day: bool,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub color: Option<String>,
    pub recurrence: Option<Recurrence>,
}

impl SessionDraft {
    /// A draft with the usual defaults: a one-hour physical group session.
    pub fn new(title: &str, date: NaiveDate, start_time: NaiveTime) -> Self {
        SessionDraft {
            title: title.to_string(),
            activity: String::new(),
            instructor: String::new(),
            date,
            start_time,
            end_time: start_time + chrono::Duration::hours(1),
            mode: SessionMode::Physical,
            group: GroupMode::Group,
            location: None,
            link: None,
            participants: 1,
            all_day: false,
            description: None,
            notes: None,
            color: None,
            recurrence: None,
        }
    }

    /// Validate the draft and build the session.
    pub fn build(self) -> ScheduleResult<Session> {
        let title = self.title.trim();
        if title.len() < TITLE_MIN || title.len() > TITLE_MAX {
            return Err(ScheduleError::invalid(
                "title",
                format!("must be {} to {} characters", TITLE_MIN, TITLE_MAX),
            ));
        }

        if let Some(description) = &self.description {
            if !description.is_empty() && description.len() < DESCRIPTION_MIN {
                return Err(ScheduleError::invalid(
                    "description",
                    format!("must be at least {} characters", DESCRIPTION_MIN),
                ));
            }
        }

        if self.instructor.trim().is_empty() {
            return Err(ScheduleError::invalid("instructor", "is required"));
        }
        if self.activity.trim().is_empty() {
            return Err(ScheduleError::invalid("activity", "is required"));
        }
        if self.participants == 0 {
            return Err(ScheduleError::invalid(
                "participants",
                "must be at least 1",
            ));
        }

        let (start, end) = if self.all_day {
            Session::all_day_bounds(self.date)
        } else {
            (
                self.date.and_time(self.start_time),
                self.date.and_time(self.end_time),
            )
        };

        let session = Session {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            activity: self.activity.trim().to_string(),
            instructor: self.instructor.trim().to_string(),
            start,
            end,
            location: self.location.filter(|l| !l.is_empty()),
            mode: self.mode,
            group: self.group,
            participants: self.participants,
            status: SessionStatus::Pending,
            all_day: self.all_day,
            description: self.description.filter(|d| !d.is_empty()),
            notes: self.notes.filter(|n| !n.is_empty()),
            link: self.link.filter(|l| !l.is_empty()),
            color: self.color,
            recurrence: self.recurrence,
        };

        session.validate()?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_draft() -> SessionDraft {
        let mut draft = SessionDraft::new(
            "Python Basics Session",
            NaiveDate::from_ymd_opt(2024, 10, 30).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        );
        draft.activity = "coding".to_string();
        draft.instructor = "Alice Johnson".to_string();
        draft.location = Some("Lab A".to_string());
        draft.participants = 10;
        draft
    }

    #[test]
    fn build_fills_defaults() {
        let session = make_draft().build().unwrap();

        assert!(!session.id.is_empty());
        assert_eq!(session.status, SessionStatus::Pending);
        assert_eq!(
            session.start,
            NaiveDate::from_ymd_opt(2024, 10, 30)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap()
        );
        // Default end is one hour after the start
        assert_eq!(session.duration(), chrono::Duration::hours(1));
    }

    #[test]
    fn title_length_bounds() {
        let mut draft = make_draft();
        draft.title = "x".to_string();
        assert!(draft.build().is_err());

        let mut draft = make_draft();
        draft.title = "y".repeat(51);
        assert!(draft.build().is_err());

        let mut draft = make_draft();
        draft.title = "ok".to_string();
        assert!(draft.build().is_ok());
    }

    #[test]
    fn short_description_is_rejected() {
        let mut draft = make_draft();
        draft.description = Some("tiny".to_string());
        assert!(draft.build().is_err());

        let mut draft = make_draft();
        draft.description = Some("Introduction to Python basics.".to_string());
        assert!(draft.build().is_ok());
    }

    #[test]
    fn required_selections() {
        let mut draft = make_draft();
        draft.instructor = "  ".to_string();
        assert!(draft.build().is_err());

        let mut draft = make_draft();
        draft.activity = String::new();
        assert!(draft.build().is_err());

        let mut draft = make_draft();
        draft.participants = 0;
        assert!(draft.build().is_err());
    }

    #[test]
    fn all_day_expands_to_full_day() {
        let mut draft = make_draft();
        draft.all_day = true;
        let session = draft.build().unwrap();

        assert_eq!(
            session.start,
            NaiveDate::from_ymd_opt(2024, 10, 30)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(
            session.end,
            NaiveDate::from_ymd_opt(2024, 10, 30)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap()
        );
        assert!(session.all_day);
    }

    #[test]
    fn mode_invariants_apply_to_drafts() {
        let mut draft = make_draft();
        draft.mode = SessionMode::Online;
        // Location still set: invalid for online sessions
        assert!(draft.build().is_err());

        let mut draft = make_draft();
        draft.mode = SessionMode::Online;
        draft.location = None;
        draft.link = Some("https://meet.google.com/xyz-defg-hij".to_string());
        assert!(draft.build().is_ok());
    }
}
