//! Terminal rendering for coachcal types.
//!
//! Extension traits and grid renderers built on owo_colors. The month view
//! is a 7-column table of day cells; week and day views are hour canvases
//! where sessions are positioned by their column geometry.

use chrono::{NaiveDate, NaiveTime};
use coachcal_core::geometry::{day_fraction, slot_geometry};
use coachcal_core::grid::DayCell;
use coachcal_core::session::{Session, SessionStatus};
use owo_colors::{AnsiColors, OwoColorize};

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for SessionStatus {
    fn render(&self) -> String {
        match self {
            SessionStatus::Pending => "pending".yellow().to_string(),
            SessionStatus::Completed => "completed".green().to_string(),
            SessionStatus::Cancelled => "cancelled".red().to_string(),
        }
    }
}

impl Render for Session {
    /// One agenda line: time span, title, coach.
    fn render(&self) -> String {
        let time = if self.all_day {
            "all-day".to_string()
        } else {
            format!(
                "{}-{}",
                self.start.format("%H:%M"),
                self.end.format("%H:%M")
            )
        };
        let coach = format!("({})", self.instructor);

        format!(
            "{:>11} {} {}",
            time,
            self.title.color(activity_color(&self.activity)),
            coach.dimmed()
        )
    }
}

/// Stable activity -> terminal color mapping.
pub fn activity_color(activity: &str) -> AnsiColors {
    const PALETTE: [AnsiColors; 6] = [
        AnsiColors::Blue,
        AnsiColors::Red,
        AnsiColors::Green,
        AnsiColors::Magenta,
        AnsiColors::Cyan,
        AnsiColors::Yellow,
    ];
    let hash: usize = activity.bytes().map(|b| b as usize).sum();
    PALETTE[hash % PALETTE.len()]
}

// =============================================================================
// Month view
// =============================================================================

const MONTH_CELL_WIDTH: usize = 16;

/// Render the month matrix: a header, weekday labels, then one block of
/// rows per week. Crowded cells end in a dimmed "+N sessions" line.
pub fn render_month(cells: &[DayCell<'_>], reference: NaiveDate, today: NaiveDate) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "  {}",
        reference.format("%B %Y").to_string().bold()
    ));
    lines.push(String::new());

    // Weekday labels follow the first row of cells
    let labels: Vec<String> = cells
        .iter()
        .take(7)
        .map(|c| pad(&c.date.format("%a").to_string(), MONTH_CELL_WIDTH))
        .collect();
    lines.push(format!("  {}", labels.join(" ").dimmed()));

    // Tallest cell in a week decides that week's height
    for week in cells.chunks(7) {
        let rows = week
            .iter()
            .map(|c| c.visible.len() + usize::from(c.hidden > 0))
            .max()
            .unwrap_or(0);

        let mut day_line = String::from("  ");
        for cell in week {
            let label = cell.date.format("%-d").to_string();
            let label = if cell.date == today {
                pad(&label, MONTH_CELL_WIDTH).black().on_white().to_string()
            } else if cell.in_month {
                pad(&label, MONTH_CELL_WIDTH)
            } else {
                pad(&label, MONTH_CELL_WIDTH).dimmed().to_string()
            };
            day_line.push_str(&label);
            day_line.push(' ');
        }
        lines.push(day_line);

        for row in 0..rows {
            let mut line = String::from("  ");
            for cell in week {
                line.push_str(&month_cell_row(cell, row));
                line.push(' ');
            }
            lines.push(line);
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn month_cell_row(cell: &DayCell<'_>, row: usize) -> String {
    if row < cell.visible.len() {
        let session = cell.visible[row];
        let time = if session.all_day {
            "—".to_string()
        } else {
            session.start.format("%H:%M").to_string()
        };
        let entry = format!("{} {}", time, session.title);
        truncate(&entry, MONTH_CELL_WIDTH)
            .color(activity_color(&session.activity))
            .to_string()
    } else if row == cell.visible.len() && cell.hidden > 0 {
        pad(&format!("+{} sessions", cell.hidden), MONTH_CELL_WIDTH)
            .dimmed()
            .to_string()
    } else {
        " ".repeat(MONTH_CELL_WIDTH)
    }
}

// =============================================================================
// Week and day views (hour canvas)
// =============================================================================

/// Rows in the hour canvas, one per hour.
const CANVAS_ROWS: usize = 24;

const WEEK_CELL_WIDTH: usize = 14;
const DAY_CELL_WIDTH: usize = 48;

/// Render a set of day columns as an hour grid. Sessions occupy the rows
/// their geometry maps to, with a one-row minimum so zero-length sessions
/// stay visible. The gutter marks the current time on today's rows.
pub fn render_canvas(
    days: &[NaiveDate],
    sessions: &[Session],
    today: NaiveDate,
    now: NaiveTime,
) -> String {
    let width = if days.len() == 1 {
        DAY_CELL_WIDTH
    } else {
        WEEK_CELL_WIDTH
    };

    let mut lines = Vec::new();

    // Column headers
    let mut header = String::from("       ");
    for day in days {
        let label = day.format("%a %-d").to_string();
        if *day == today {
            header.push_str(&pad(&label, width).black().on_white().to_string());
        } else {
            header.push_str(&pad(&label, width).bold().to_string());
        }
        header.push(' ');
    }
    lines.push(header);

    // All-day sessions get a banner row above the canvas
    let banner = all_day_banner(days, sessions, width);
    if let Some(banner) = banner {
        lines.push(banner);
    }

    // Per-column row assignment
    let columns: Vec<Vec<(usize, usize, &Session)>> = days
        .iter()
        .map(|day| column_slots(sessions, *day))
        .collect();

    let now_row = (day_fraction(now) * CANVAS_ROWS as f64) as usize;
    let today_visible = days.contains(&today);

    for row in 0..CANVAS_ROWS {
        let gutter = if today_visible && row == now_row {
            format!("{:>5}▸", now.format("%H:%M")).red().to_string()
        } else {
            format!("{:>5} ", format!("{:02}:00", row)).dimmed().to_string()
        };

        let mut line = gutter;
        line.push(' ');
        for slots in &columns {
            line.push_str(&canvas_cell(slots, row, width));
            line.push(' ');
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Map each timed session of `day` onto its canvas rows.
fn column_slots(sessions: &[Session], day: NaiveDate) -> Vec<(usize, usize, &Session)> {
    let mut slots = Vec::new();
    for session in sessions {
        if session.all_day || !session.starts_on(day) {
            continue;
        }
        let geometry = slot_geometry(session.start, session.end, day);
        let first = (geometry.top * CANVAS_ROWS as f64) as usize;
        let last = (geometry.bottom() * CANVAS_ROWS as f64).ceil() as usize;
        // One-row minimum keeps zero-height sessions on screen
        let last = last.max(first + 1).min(CANVAS_ROWS);
        slots.push((first, last, session));
    }
    slots.sort_by_key(|(first, _, session)| (*first, session.start));
    slots
}

fn canvas_cell(slots: &[(usize, usize, &Session)], row: usize, width: usize) -> String {
    for (first, last, session) in slots {
        if row < *first || row >= *last {
            continue;
        }
        let color = activity_color(&session.activity);
        if row == *first {
            let entry = format!(
                "{} {}",
                session.start.format("%H:%M"),
                session.title
            );
            return truncate(&entry, width).color(color).to_string();
        }
        return pad("│", width).color(color).to_string();
    }
    pad("·", width).dimmed().to_string()
}

fn all_day_banner(days: &[NaiveDate], sessions: &[Session], width: usize) -> Option<String> {
    let mut any = false;
    let mut banner = String::from("       ");
    for day in days {
        let entry = sessions
            .iter()
            .find(|s| s.all_day && s.starts_on(*day));
        match entry {
            Some(session) => {
                any = true;
                banner.push_str(
                    &truncate(&session.title, width)
                        .color(activity_color(&session.activity))
                        .to_string(),
                );
            }
            None => banner.push_str(&" ".repeat(width)),
        }
        banner.push(' ');
    }
    any.then_some(banner)
}

// =============================================================================
// Text helpers
// =============================================================================

fn pad(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        pad(s, width)
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
