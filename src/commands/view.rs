use anyhow::Result;
use chrono::NaiveDate;
use coachcal_core::config::SchedulerConfig;
use coachcal_core::filter::SessionFilter;
use coachcal_core::grid::day_cells;
use coachcal_core::navigate::{ViewMode, ViewState};
use coachcal_core::session::Session;
use coachcal_core::store::SessionStore;
use owo_colors::OwoColorize;

use crate::render::{render_canvas, render_month};

pub fn run(
    store: &SessionStore,
    config: &SchedulerConfig,
    mode: Option<&str>,
    reference: NaiveDate,
    step: i32,
    filter: &SessionFilter,
    today: NaiveDate,
) -> Result<()> {
    let mode: ViewMode = match mode {
        Some(s) => s.parse()?,
        None => config.default_view_mode()?,
    };
    let week_start = config.week_start_day()?;

    let mut view = ViewState::new(mode, reference, week_start);
    view.advance(step);

    let days = view.visible_days();
    let first = days.first().copied().unwrap_or(view.reference);
    let last = days.last().copied().unwrap_or(view.reference);

    // Recurring masters expand into the window before filtering
    let sessions: Vec<Session> = store
        .in_range(
            first.and_hms_opt(0, 0, 0).unwrap(),
            last.and_hms_opt(23, 59, 59).unwrap(),
        )?
        .into_iter()
        .filter(|s| filter.matches(s))
        .collect();

    let now = chrono::Local::now().time();

    match mode {
        ViewMode::Month => {
            let cells = day_cells(&days, &sessions, view.reference, config.max_visible_sessions);
            println!("{}", render_month(&cells, view.reference, today));
        }
        ViewMode::Week | ViewMode::Day => {
            println!(
                "  {}",
                view.reference.format("%B %Y").to_string().bold()
            );
            println!();
            println!("{}", render_canvas(&days, &sessions, today, now));
        }
    }

    if sessions.is_empty() {
        println!();
        println!("{}", "  No sessions in this window".dimmed());
    }

    Ok(())
}
