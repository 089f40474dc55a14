//! The session store.
//!
//! Owns the in-memory session list and is the only place it mutates.
//! Views read from it; every mutation goes through a named operation that
//! re-checks the model invariants, so the list never holds an invalid
//! session. Mutations are synchronous and apply one at a time.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{ScheduleError, ScheduleResult};
use crate::filter::SessionFilter;
use crate::recurrence::expand_recurring_session;
use crate::session::Session;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Build a store from an existing roster, validating every entry.
    pub fn from_sessions(sessions: Vec<Session>) -> ScheduleResult<Self> {
        let mut store = SessionStore::new();
        for session in sessions {
            store.add(session)?;
        }
        Ok(store)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Add a new session. Rejects duplicate ids and invalid sessions.
    pub fn add(&mut self, session: Session) -> ScheduleResult<&Session> {
        session.validate()?;
        if self.get(&session.id).is_some() {
            return Err(ScheduleError::DuplicateSession(session.id));
        }
        self.sessions.push(session);
        Ok(self.sessions.last().unwrap())
    }

    /// Replace a session in place, matched by id.
    pub fn update(&mut self, updated: Session) -> ScheduleResult<()> {
        updated.validate()?;
        let slot = self
            .sessions
            .iter_mut()
            .find(|s| s.id == updated.id)
            .ok_or_else(|| ScheduleError::SessionNotFound(updated.id.clone()))?;
        *slot = updated;
        Ok(())
    }

    /// The drag-to-reschedule operation: move a session onto `day`,
    /// keeping its time-of-day and duration. No conflict detection; sessions
    /// landing on an occupied slot stack, they are never rejected.
    pub fn move_to_day(&mut self, id: &str, day: NaiveDate) -> ScheduleResult<&Session> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ScheduleError::SessionNotFound(id.to_string()))?;

        let moved = self.sessions[index].rescheduled_to(day);
        moved.validate()?;
        self.sessions[index] = moved;
        Ok(&self.sessions[index])
    }

    /// Remove a session and return it.
    pub fn remove(&mut self, id: &str) -> ScheduleResult<Session> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ScheduleError::SessionNotFound(id.to_string()))?;
        Ok(self.sessions.remove(index))
    }

    /// Sessions starting on `day`, unsorted (grid bucketing sorts).
    pub fn on_day(&self, day: NaiveDate) -> Vec<&Session> {
        self.sessions.iter().filter(|s| s.starts_on(day)).collect()
    }

    /// Sessions visible through `filter`.
    pub fn filtered(&self, filter: &SessionFilter) -> Vec<&Session> {
        self.sessions.iter().filter(|s| filter.matches(s)).collect()
    }

    /// All sessions starting within `[from, to]`, with recurring masters
    /// expanded into their instances. Sorted by start time.
    pub fn in_range(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> ScheduleResult<Vec<Session>> {
        let mut result = Vec::new();

        for session in &self.sessions {
            if session.recurrence.is_some() {
                result.extend(expand_recurring_session(session, from, to)?);
            } else if session.start >= from && session.start <= to {
                result.push(session.clone());
            }
        }

        result.sort_by_key(|s| s.start);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::{Frequency, Recurrence};
    use crate::session::{GroupMode, SessionMode, SessionStatus};
    use chrono::Duration;

    fn session(id: &str, day: NaiveDate, hour: u32) -> Session {
        Session {
            id: id.to_string(),
            title: format!("Session {}", id),
            activity: "chess".to_string(),
            instructor: "John Doe".to_string(),
            start: day.and_hms_opt(hour, 0, 0).unwrap(),
            end: day.and_hms_opt(hour + 1, 0, 0).unwrap(),
            location: Some("Room 101".to_string()),
            mode: SessionMode::Physical,
            group: GroupMode::Group,
            participants: 8,
            status: SessionStatus::Pending,
            all_day: false,
            description: None,
            notes: None,
            link: None,
            color: None,
            recurrence: None,
        }
    }

    fn nov(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    #[test]
    fn add_rejects_duplicates_and_invalid() {
        let mut store = SessionStore::new();
        store.add(session("a", nov(1), 9)).unwrap();

        assert!(matches!(
            store.add(session("a", nov(2), 9)),
            Err(ScheduleError::DuplicateSession(_))
        ));

        let mut bad = session("b", nov(1), 9);
        bad.end = bad.start - Duration::minutes(1);
        assert!(store.add(bad).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = SessionStore::new();
        store.add(session("a", nov(1), 9)).unwrap();

        let mut changed = session("a", nov(1), 9);
        changed.title = "Renamed".to_string();
        store.update(changed).unwrap();

        assert_eq!(store.get("a").unwrap().title, "Renamed");
        assert_eq!(store.len(), 1);

        assert!(matches!(
            store.update(session("missing", nov(1), 9)),
            Err(ScheduleError::SessionNotFound(_))
        ));
    }

    #[test]
    fn move_to_day_applies_the_drag_contract() {
        let mut store = SessionStore::new();
        store.add(session("a", nov(1), 9)).unwrap();

        let moved = store.move_to_day("a", nov(5)).unwrap();
        assert_eq!(moved.start, nov(5).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(moved.end, nov(5).and_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn move_allows_stacking() {
        // Two sessions in the same slot coexist; occupancy is never rejected
        let mut store = SessionStore::new();
        store.add(session("a", nov(1), 9)).unwrap();
        store.add(session("b", nov(5), 9)).unwrap();

        store.move_to_day("a", nov(5)).unwrap();
        assert_eq!(store.on_day(nov(5)).len(), 2);
    }

    #[test]
    fn remove_deletes_for_real() {
        let mut store = SessionStore::new();
        store.add(session("a", nov(1), 9)).unwrap();

        let removed = store.remove("a").unwrap();
        assert_eq!(removed.id, "a");
        assert!(store.is_empty());
        assert!(matches!(
            store.remove("a"),
            Err(ScheduleError::SessionNotFound(_))
        ));
    }

    #[test]
    fn filtered_applies_the_menu_facets() {
        let mut store = SessionStore::new();
        store.add(session("a", nov(1), 9)).unwrap();
        let mut other = session("b", nov(1), 11);
        other.instructor = "Jane Smith".to_string();
        store.add(other).unwrap();

        let mut filter = SessionFilter::default();
        filter.toggle_instructor("Jane Smith");

        let visible = store.filtered(&filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "b");
    }

    #[test]
    fn in_range_expands_recurring_masters() {
        let mut store = SessionStore::new();
        store.add(session("plain", nov(4), 9)).unwrap();

        let mut master = session("weekly", nov(4), 15);
        master.recurrence = Some(Recurrence {
            frequency: Frequency::Weekly,
            interval: 1,
            days_of_week: vec![],
            until: None,
        });
        store.add(master).unwrap();

        let listed = store
            .in_range(
                nov(1).and_hms_opt(0, 0, 0).unwrap(),
                nov(30).and_hms_opt(23, 59, 59).unwrap(),
            )
            .unwrap();

        // one plain + four Mondays (Nov 4, 11, 18, 25)
        assert_eq!(listed.len(), 5);
        assert!(listed.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn in_range_excludes_sessions_outside() {
        let mut store = SessionStore::new();
        store.add(session("early", nov(1), 9)).unwrap();
        store.add(session("late", nov(20), 9)).unwrap();

        let listed = store
            .in_range(
                nov(10).and_hms_opt(0, 0, 0).unwrap(),
                nov(30).and_hms_opt(0, 0, 0).unwrap(),
            )
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "late");
    }
}
