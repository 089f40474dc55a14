use anyhow::Result;
use chrono::NaiveDate;
use coachcal_core::date_range::DateRange;
use coachcal_core::filter::SessionFilter;
use coachcal_core::session::Session;
use coachcal_core::store::SessionStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(
    store: &SessionStore,
    range: DateRange,
    filter: &SessionFilter,
    today: NaiveDate,
) -> Result<()> {
    let sessions: Vec<Session> = store
        .in_range(range.from, range.to)?
        .into_iter()
        .filter(|s| filter.matches(s))
        .collect();

    if sessions.is_empty() {
        println!("{}", "No sessions found".dimmed());
        return Ok(());
    }

    // Group by day and print
    let mut current_date: Option<String> = None;

    for session in &sessions {
        let date_label = format_date_label(session.start.date(), today);

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        let id_tag = format!("[{}]", short_id(&session.id));
        println!("  {} {}", session.render(), id_tag.dimmed());
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Nov 6")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// First id segment, enough to address a session from the shell.
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
