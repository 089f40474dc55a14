use anyhow::Result;
use chrono::NaiveDate;
use coachcal_core::store::SessionStore;
use owo_colors::OwoColorize;

use super::resolve_session_id;

/// Move a session onto another day. Time of day and duration carry over;
/// landing in an occupied slot is fine, nothing checks for conflicts.
pub fn run(store: &mut SessionStore, id: &str, day: &str) -> Result<()> {
    let id = resolve_session_id(store, id)?;
    let target = parse_day(day)?;

    let moved = store.move_to_day(&id, target)?;

    println!(
        "{}",
        format!(
            "  Moved: {} → {} {}-{}",
            moved.title,
            moved.start.format("%a %b %-d"),
            moved.start.format("%H:%M"),
            moved.end.format("%H:%M")
        )
        .green()
    );

    Ok(())
}

/// YYYY-MM-DD, or natural language ("next friday", "nov 12").
fn parse_day(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    fuzzydate::parse(input)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse day: \"{}\"", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_day_iso() {
        assert_eq!(
            parse_day("2024-11-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
        );
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(parse_day("not a day at all xyz").is_err());
    }
}
