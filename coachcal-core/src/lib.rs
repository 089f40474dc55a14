//! Scheduling engine for coachcal.
//!
//! This crate holds everything below the terminal UI:
//! - `session` - the session model and its invariants
//! - `geometry` - time-to-column-geometry mapping for day/week views
//! - `grid` - month matrix derivation and day buckets
//! - `navigate` - view window arithmetic (day/week/month stepping)
//! - `store` - the owning, validating session list
//! - `filter`, `form`, `recurrence`, `config`, `date_range` - supporting pieces

pub mod config;
pub mod date_range;
pub mod error;
pub mod filter;
pub mod form;
pub mod geometry;
pub mod grid;
pub mod navigate;
pub mod recurrence;
pub mod session;
pub mod store;

pub use error::{ScheduleError, ScheduleResult};
pub use session::{GroupMode, Session, SessionMode, SessionStatus};
