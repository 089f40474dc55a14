use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use coachcal_core::store::SessionStore;
use owo_colors::OwoColorize;

use super::resolve_session_id;

pub struct EditArgs {
    pub title: Option<String>,
    pub coach: Option<String>,
    pub activity: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub mode: Option<String>,
    pub group: Option<String>,
    pub participants: Option<u32>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

pub fn run(store: &mut SessionStore, id: &str, args: EditArgs) -> Result<()> {
    let id = resolve_session_id(store, id)?;
    let original = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("No session matches '{}'", id))?
        .clone();

    let mut updated = original.clone();
    let mut changes: Vec<(String, String, String)> = Vec::new();

    if let Some(title) = args.title {
        changes.push(("title".into(), updated.title.clone(), title.clone()));
        updated.title = title;
    }
    if let Some(coach) = args.coach {
        changes.push(("coach".into(), updated.instructor.clone(), coach.clone()));
        updated.instructor = coach;
    }
    if let Some(activity) = args.activity {
        changes.push(("activity".into(), updated.activity.clone(), activity.clone()));
        updated.activity = activity;
    }

    if let Some(date) = args.date {
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", date))?;
        let moved = updated.rescheduled_to(date);
        changes.push((
            "date".into(),
            updated.start.date().to_string(),
            date.to_string(),
        ));
        updated = moved;
    }
    if let Some(start) = args.start {
        let time = parse_time(&start)?;
        changes.push((
            "start".into(),
            updated.start.time().format("%H:%M").to_string(),
            start,
        ));
        updated.start = updated.start.date().and_time(time);
    }
    if let Some(end) = args.end {
        let time = parse_time(&end)?;
        changes.push((
            "end".into(),
            updated.end.time().format("%H:%M").to_string(),
            end,
        ));
        updated.end = updated.start.date().and_time(time);
    }

    if let Some(location) = args.location {
        changes.push((
            "location".into(),
            updated.location.clone().unwrap_or_else(|| "(none)".into()),
            location.clone(),
        ));
        updated.location = if location.is_empty() { None } else { Some(location) };
    }
    if let Some(link) = args.link {
        changes.push((
            "link".into(),
            updated.link.clone().unwrap_or_else(|| "(none)".into()),
            link.clone(),
        ));
        updated.link = if link.is_empty() { None } else { Some(link) };
    }
    if let Some(mode) = args.mode {
        changes.push(("mode".into(), updated.mode.to_string(), mode.clone()));
        updated.mode = mode.parse()?;
    }
    if let Some(group) = args.group {
        changes.push(("group".into(), updated.group.to_string(), group.clone()));
        updated.group = group.parse()?;
    }
    if let Some(participants) = args.participants {
        changes.push((
            "participants".into(),
            updated.participants.to_string(),
            participants.to_string(),
        ));
        updated.participants = participants;
    }
    if let Some(status) = args.status {
        changes.push(("status".into(), updated.status.to_string(), status.clone()));
        updated.status = status.parse()?;
    }
    if let Some(description) = args.description {
        updated.description = if description.is_empty() {
            None
        } else {
            Some(description)
        };
        changes.push(("description".into(), "…".into(), "…".into()));
    }
    if let Some(notes) = args.notes {
        updated.notes = if notes.is_empty() { None } else { Some(notes) };
        changes.push(("notes".into(), "…".into(), "…".into()));
    }

    if changes.is_empty() {
        println!("{}", "  Nothing to change".dimmed());
        return Ok(());
    }

    store.update(updated)?;

    println!("{}", format!("  Updated: {}", original.title).green());
    for (field, old, new) in &changes {
        println!("    {}: {} → {}", field.dimmed(), old.red(), new.green());
    }

    Ok(())
}

fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| anyhow::anyhow!("Could not parse time: \"{}\". Expected HH:MM", input))
}
