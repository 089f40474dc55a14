use anyhow::Result;
use coachcal_core::store::SessionStore;
use owo_colors::OwoColorize;

use super::resolve_session_id;
use crate::render::Render;

pub fn run(store: &SessionStore, id: &str) -> Result<()> {
    let id = resolve_session_id(store, id)?;
    let session = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("No session matches '{}'", id))?;

    println!("{}", session.title.bold());
    if let Some(description) = &session.description {
        println!("{}", description.dimmed());
    }
    println!();

    println!("  {}  {}", "date".dimmed(), session.start.format("%d %B %Y"));
    if session.all_day {
        println!("  {}  all day", "time".dimmed());
    } else {
        println!(
            "  {}  {} → {}",
            "time".dimmed(),
            session.start.format("%H:%M"),
            session.end.format("%H:%M")
        );
    }
    match (&session.location, &session.link) {
        (Some(location), _) => println!("  {} {}", "place".dimmed(), location),
        (None, Some(link)) => println!("  {}  {}", "link".dimmed(), link.blue()),
        (None, None) => {}
    }
    println!();

    println!("  {} Coach {}", "coach".dimmed(), session.instructor);
    println!(
        "  {} {} {}",
        "group".dimmed(),
        session.participants,
        if session.participants == 1 {
            "participant"
        } else {
            "participants"
        }
    );
    println!(
        "  {}  {} ({})",
        "kind".dimmed(),
        session.activity,
        session.group
    );
    println!("  {} {}", "state".dimmed(), session.status.render());

    if let Some(recurrence) = &session.recurrence {
        println!("  {} {}", "rule".dimmed(), recurrence.to_rrule());
    }
    if let Some(notes) = &session.notes {
        println!();
        println!("  {}", notes.dimmed());
    }
    println!();
    println!("  {} {}", "id".dimmed(), session.id.dimmed());

    Ok(())
}
