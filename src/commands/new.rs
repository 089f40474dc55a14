use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use coachcal_core::form::SessionDraft;
use coachcal_core::session::{GroupMode, SessionMode};
use coachcal_core::store::SessionStore;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

pub struct NewArgs {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub coach: Option<String>,
    pub activity: Option<String>,
    pub mode: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub group: Option<String>,
    pub participants: Option<u32>,
    pub description: Option<String>,
    pub all_day: bool,
}

pub fn run(store: &mut SessionStore, args: NewArgs) -> Result<()> {
    let interactive = args.title.is_none() || args.start.is_none();

    // --- Title ---
    let title = match args.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Start ---
    let (start, timed) = if let Some(s) = args.start {
        parse_start(&s)?
    } else {
        prompt_with_retry("  When?", parse_start)?
    };
    let all_day = args.all_day || !timed;

    // --- End ---
    let end_time = if all_day {
        start.time()
    } else if let Some(end_input) = args.end {
        parse_time(&end_input)?
    } else if let Some(dur_input) = args.duration {
        apply_duration(start.time(), &dur_input)?
    } else if interactive {
        prompt_duration(start.time())?
    } else {
        default_end(start.time())
    };

    // --- Coach / activity ---
    let coach = match args.coach {
        Some(c) => c,
        None => Input::<String>::new()
            .with_prompt("  Coach")
            .interact_text()?,
    };
    let activity = match args.activity {
        Some(a) => a,
        None => Input::<String>::new()
            .with_prompt("  Activity")
            .interact_text()?,
    };

    // --- Mode and place ---
    let mode = resolve_mode(args.mode, interactive)?;
    let (location, link) = match mode {
        SessionMode::Physical => {
            let location = match args.location {
                Some(l) => l,
                None if interactive => Input::<String>::new()
                    .with_prompt("  Where?")
                    .interact_text()?,
                None => anyhow::bail!("Physical sessions need --location"),
            };
            (Some(location), None)
        }
        SessionMode::Online => (None, args.link),
    };

    let group = match args.group {
        Some(g) => g.parse::<GroupMode>()?,
        None => GroupMode::Group,
    };

    let mut draft = SessionDraft::new(&title, start.date(), start.time());
    draft.end_time = end_time;
    draft.instructor = coach;
    draft.activity = activity;
    draft.mode = mode;
    draft.group = group;
    draft.location = location;
    draft.link = link;
    draft.participants = args.participants.unwrap_or(1);
    draft.description = args.description;
    draft.all_day = all_day;

    let session = store.add(draft.build()?)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", session.title).green());

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Prompt for an end time or duration, defaulting to one hour.
fn prompt_duration(start: NaiveTime) -> Result<NaiveTime> {
    loop {
        let input: String = Input::new()
            .with_prompt("  How long? (1 hour)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(default_end(start));
        }
        match parse_end(&input, start) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let mut result = String::new();
    let lower = input.to_lowercase();

    for (i, word) in lower.split_whitespace().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        let expanded = abbrevs
            .iter()
            .find(|(abbr, _)| *abbr == word)
            .map(|(_, full)| *full)
            .unwrap_or(word);
        result.push_str(expanded);
    }

    result
}

/// Parse a natural language start. The bool is whether the input carried a
/// time of day; date-only input means an all-day session.
fn parse_start(input: &str) -> Result<(NaiveDateTime, bool)> {
    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    Ok((dt, has_time_component(input)))
}

/// Check if the user's input string contains time-related tokens.
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    // am/pm patterns like "6pm", "6 pm", "11am"
    let bytes = lower.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'a' || b == b'p' {
            if i + 1 < bytes.len() && bytes[i + 1] == b'm' {
                if i > 0 && bytes[i - 1].is_ascii_digit() {
                    return true;
                }
                if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                    return true;
                }
            }
        }
    }

    // HH:MM pattern
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':' {
            let has_digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let has_digit_after = i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit();
            if has_digit_before && has_digit_after {
                return true;
            }
        }
    }

    // "at" followed by a digit
    if let Some(pos) = lower.find(" at ") {
        let after = &lower[pos + 4..];
        if after.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
    }
    if let Some(after) = lower.strip_prefix("at ") {
        if after.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
    }

    false
}

/// Parse an end input — tries duration first (humantime), then HH:MM.
fn parse_end(input: &str, start: NaiveTime) -> Result<NaiveTime> {
    if let Ok(end) = try_apply_duration(start, input) {
        return Ok(end);
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    parse_time(cleaned)
}

fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| anyhow::anyhow!("Could not parse time: \"{}\". Expected HH:MM", input))
}

fn apply_duration(start: NaiveTime, dur_input: &str) -> Result<NaiveTime> {
    try_apply_duration(start, dur_input)
        .with_context(|| format!("Could not parse duration: \"{}\"", dur_input))
}

fn try_apply_duration(start: NaiveTime, dur_input: &str) -> Result<NaiveTime> {
    let std_dur = humantime::parse_duration(dur_input).map_err(|e| anyhow::anyhow!("{}", e))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;
    Ok(start + chrono_dur)
}

/// Default end time: one hour after the start.
fn default_end(start: NaiveTime) -> NaiveTime {
    start + Duration::hours(1)
}

fn resolve_mode(mode: Option<String>, interactive: bool) -> Result<SessionMode> {
    if let Some(mode) = mode {
        return Ok(mode.parse()?);
    }
    if interactive {
        let selection = Select::new()
            .with_prompt("  Mode")
            .items(&["physical", "online"])
            .default(0)
            .interact()?;
        return Ok(if selection == 0 {
            SessionMode::Physical
        } else {
            SessionMode::Online
        });
    }
    Ok(SessionMode::Physical)
}
