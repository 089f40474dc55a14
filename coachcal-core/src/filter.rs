//! Session filtering.
//!
//! The filter menu's three facets: coaches, activities, statuses. An empty
//! facet matches everything; a populated facet matches by membership. The
//! facets AND together.

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionFilter {
    #[serde(default)]
    pub instructors: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<SessionStatus>,
}

impl SessionFilter {
    pub fn is_empty(&self) -> bool {
        self.instructors.is_empty() && self.activities.is_empty() && self.statuses.is_empty()
    }

    pub fn matches(&self, session: &Session) -> bool {
        let instructor_ok =
            self.instructors.is_empty() || self.instructors.contains(&session.instructor);
        let activity_ok = self.activities.is_empty() || self.activities.contains(&session.activity);
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&session.status);

        instructor_ok && activity_ok && status_ok
    }

    /// Checkbox semantics: add the value if absent, remove it if present.
    pub fn toggle_instructor(&mut self, name: &str) {
        toggle(&mut self.instructors, name.to_string());
    }

    pub fn toggle_activity(&mut self, activity: &str) {
        toggle(&mut self.activities, activity.to_string());
    }

    pub fn toggle_status(&mut self, status: SessionStatus) {
        toggle(&mut self.statuses, status);
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if let Some(index) = values.iter().position(|v| *v == value) {
        values.remove(index);
    } else {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GroupMode, SessionMode};
    use chrono::NaiveDate;

    fn session(instructor: &str, activity: &str, status: SessionStatus) -> Session {
        let day = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        Session {
            id: format!("{}-{}", instructor, activity),
            title: "Session".to_string(),
            activity: activity.to_string(),
            instructor: instructor.to_string(),
            start: day.and_hms_opt(9, 0, 0).unwrap(),
            end: day.and_hms_opt(10, 0, 0).unwrap(),
            location: Some("Room 101".to_string()),
            mode: SessionMode::Physical,
            group: GroupMode::Group,
            participants: 5,
            status,
            all_day: false,
            description: None,
            notes: None,
            link: None,
            color: None,
            recurrence: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = SessionFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&session("Jane Smith", "scrabble", SessionStatus::Pending)));
    }

    #[test]
    fn facets_and_together() {
        let mut filter = SessionFilter::default();
        filter.toggle_instructor("Jane Smith");
        filter.toggle_activity("scrabble");

        assert!(filter.matches(&session("Jane Smith", "scrabble", SessionStatus::Pending)));
        assert!(!filter.matches(&session("Jane Smith", "chess", SessionStatus::Pending)));
        assert!(!filter.matches(&session("John Doe", "scrabble", SessionStatus::Pending)));
    }

    #[test]
    fn values_within_a_facet_or_together() {
        let mut filter = SessionFilter::default();
        filter.toggle_activity("chess");
        filter.toggle_activity("coding");

        assert!(filter.matches(&session("John Doe", "chess", SessionStatus::Pending)));
        assert!(filter.matches(&session("John Doe", "coding", SessionStatus::Pending)));
        assert!(!filter.matches(&session("John Doe", "scrabble", SessionStatus::Pending)));
    }

    #[test]
    fn toggle_twice_clears_the_value() {
        let mut filter = SessionFilter::default();
        filter.toggle_status(SessionStatus::Cancelled);
        assert!(!filter.matches(&session("John Doe", "chess", SessionStatus::Pending)));

        filter.toggle_status(SessionStatus::Cancelled);
        assert!(filter.is_empty());
        assert!(filter.matches(&session("John Doe", "chess", SessionStatus::Pending)));
    }
}
