//! Roster file handling.
//!
//! The roster is the JSON list of sessions the scheduler works on. It is
//! read into the store at startup and written back after a mutating command.
//! A missing file is an empty roster.

use std::path::Path;

use anyhow::{Context, Result};
use coachcal_core::session::Session;
use coachcal_core::store::SessionStore;

pub fn load(path: &Path) -> Result<SessionStore> {
    if !path.exists() {
        return Ok(SessionStore::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster {}", path.display()))?;

    let sessions: Vec<Session> = serde_json::from_str(&content)
        .with_context(|| format!("Roster {} is not valid", path.display()))?;

    let store = SessionStore::from_sessions(sessions)
        .with_context(|| format!("Roster {} holds an invalid session", path.display()))?;

    Ok(store)
}

pub fn save(path: &Path, store: &SessionStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(store.sessions())?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write roster {}", path.display()))?;

    Ok(())
}
