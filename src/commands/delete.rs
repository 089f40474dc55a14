use anyhow::Result;
use coachcal_core::store::SessionStore;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::resolve_session_id;

/// Remove a session from the roster. Returns whether anything was deleted
/// (the caller only rewrites the roster when it was).
pub fn run(store: &mut SessionStore, id: &str, yes: bool) -> Result<bool> {
    let id = resolve_session_id(store, id)?;
    let title = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("No session matches '{}'", id))?
        .title
        .clone();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete '{}'? This cannot be undone", title))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Kept".dimmed());
            return Ok(false);
        }
    }

    store.remove(&id)?;
    println!("{}", format!("  Deleted: {}", title).red());

    Ok(true)
}
