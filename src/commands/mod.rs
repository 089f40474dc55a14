pub mod agenda;
pub mod delete;
pub mod edit;
pub mod new;
pub mod reschedule;
pub mod show;
pub mod view;

use anyhow::Result;
use coachcal_core::store::SessionStore;

/// Resolve a session by full id or unique prefix (agenda prints prefixes).
pub fn resolve_session_id(store: &SessionStore, input: &str) -> Result<String> {
    if store.get(input).is_some() {
        return Ok(input.to_string());
    }

    let matches: Vec<&str> = store
        .sessions()
        .iter()
        .filter(|s| s.id.starts_with(input))
        .map(|s| s.id.as_str())
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => anyhow::bail!("No session matches '{}'", input),
        many => anyhow::bail!(
            "'{}' is ambiguous, matches: {}",
            input,
            many.join(", ")
        ),
    }
}
