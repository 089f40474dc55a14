mod commands;
mod render;
mod roster;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use coachcal_core::config::SchedulerConfig;
use coachcal_core::date_range::DateRange;
use coachcal_core::filter::SessionFilter;

#[derive(Parser)]
#[command(name = "coachcal")]
#[command(about = "Browse and schedule coaching sessions from the terminal")]
struct Cli {
    /// Roster file to use instead of the configured one
    #[arg(long, global = true)]
    roster: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the calendar grid
    View {
        /// Grid granularity: day, week or month (defaults to the configured view)
        #[arg(short, long)]
        mode: Option<String>,

        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Step the window this many units forward (negative steps back)
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        step: i32,

        /// Only sessions by this coach (repeatable)
        #[arg(long = "coach")]
        coaches: Vec<String>,

        /// Only sessions of this activity (repeatable)
        #[arg(long = "activity")]
        activities: Vec<String>,

        /// Only sessions with this status (repeatable)
        #[arg(long = "status")]
        statuses: Vec<String>,
    },
    /// List upcoming sessions grouped by day
    Agenda {
        /// List from this date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        from: Option<String>,

        /// List until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only sessions by this coach (repeatable)
        #[arg(long = "coach")]
        coaches: Vec<String>,

        /// Only sessions of this activity (repeatable)
        #[arg(long = "activity")]
        activities: Vec<String>,

        /// Only sessions with this status (repeatable)
        #[arg(long = "status")]
        statuses: Vec<String>,
    },
    /// Create a session (prompts for anything not given)
    New {
        title: Option<String>,

        /// Start date/time (e.g. "2024-11-01 16:00", "tomorrow 3pm")
        #[arg(short, long)]
        start: Option<String>,

        /// End time of day (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// Duration instead of an end time (e.g. "90m", "2h")
        #[arg(long)]
        duration: Option<String>,

        /// Coach running the session
        #[arg(short, long)]
        coach: Option<String>,

        /// Activity category (e.g. chess, scrabble, coding)
        #[arg(short, long)]
        activity: Option<String>,

        /// physical or online
        #[arg(long)]
        mode: Option<String>,

        /// Room or address (physical sessions)
        #[arg(short, long)]
        location: Option<String>,

        /// Meeting link (online sessions)
        #[arg(long)]
        link: Option<String>,

        /// individual or group
        #[arg(short, long)]
        group: Option<String>,

        #[arg(short, long)]
        participants: Option<u32>,

        #[arg(long)]
        description: Option<String>,

        /// The session runs all day
        #[arg(long)]
        all_day: bool,
    },
    /// Show a session's details
    Show { id: String },
    /// Change fields of a session
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        coach: Option<String>,

        #[arg(long)]
        activity: Option<String>,

        /// New date (YYYY-MM-DD), keeping the times
        #[arg(long)]
        date: Option<String>,

        /// New start time of day (HH:MM)
        #[arg(long)]
        start: Option<String>,

        /// New end time of day (HH:MM)
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        link: Option<String>,

        /// physical or online
        #[arg(long)]
        mode: Option<String>,

        /// individual or group
        #[arg(long)]
        group: Option<String>,

        #[arg(long)]
        participants: Option<u32>,

        /// pending, completed or cancelled
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Move a session onto another day, keeping its time and length
    Move {
        id: String,

        /// Target day (YYYY-MM-DD or e.g. "next friday")
        day: String,
    },
    /// Delete a session
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SchedulerConfig::load()?;
    let roster_path = match &cli.roster {
        Some(path) => std::path::PathBuf::from(path),
        None => config.roster_file(),
    };

    let mut store = roster::load(&roster_path)?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::View {
            mode,
            date,
            step,
            coaches,
            activities,
            statuses,
        } => {
            let filter = build_filter(coaches, activities, statuses)?;
            let reference = parse_date_arg(date.as_deref(), today)?;
            commands::view::run(&store, &config, mode.as_deref(), reference, step, &filter, today)
        }
        Commands::Agenda {
            from,
            to,
            coaches,
            activities,
            statuses,
        } => {
            let filter = build_filter(coaches, activities, statuses)?;
            let range = DateRange::from_args(from.as_deref(), to.as_deref(), today)
                .map_err(|e| anyhow::anyhow!(e))?;
            commands::agenda::run(&store, range, &filter, today)
        }
        Commands::New {
            title,
            start,
            end,
            duration,
            coach,
            activity,
            mode,
            location,
            link,
            group,
            participants,
            description,
            all_day,
        } => {
            commands::new::run(
                &mut store,
                commands::new::NewArgs {
                    title,
                    start,
                    end,
                    duration,
                    coach,
                    activity,
                    mode,
                    location,
                    link,
                    group,
                    participants,
                    description,
                    all_day,
                },
            )?;
            roster::save(&roster_path, &store)
        }
        Commands::Show { id } => commands::show::run(&store, &id),
        Commands::Edit {
            id,
            title,
            coach,
            activity,
            date,
            start,
            end,
            location,
            link,
            mode,
            group,
            participants,
            status,
            description,
            notes,
        } => {
            commands::edit::run(
                &mut store,
                &id,
                commands::edit::EditArgs {
                    title,
                    coach,
                    activity,
                    date,
                    start,
                    end,
                    location,
                    link,
                    mode,
                    group,
                    participants,
                    status,
                    description,
                    notes,
                },
            )?;
            roster::save(&roster_path, &store)
        }
        Commands::Move { id, day } => {
            commands::reschedule::run(&mut store, &id, &day)?;
            roster::save(&roster_path, &store)
        }
        Commands::Delete { id, yes } => {
            if commands::delete::run(&mut store, &id, yes)? {
                roster::save(&roster_path, &store)?;
            }
            Ok(())
        }
    }
}

fn build_filter(
    coaches: Vec<String>,
    activities: Vec<String>,
    statuses: Vec<String>,
) -> Result<SessionFilter> {
    let statuses = statuses
        .iter()
        .map(|s| s.parse())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SessionFilter {
        instructors: coaches,
        activities,
        statuses,
    })
}

fn parse_date_arg(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", s)),
        None => Ok(today),
    }
}
