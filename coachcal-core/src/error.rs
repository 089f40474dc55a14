//! Error types for the coachcal engine.

use thiserror::Error;

/// Errors that can occur in scheduling operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session already exists: {0}")]
    DuplicateSession(String),

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Recurrence error: {0}")]
    Recurrence(String),

    #[error("Roster error: {0}")]
    Roster(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    /// Shorthand for a validation failure on a named field.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ScheduleError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
