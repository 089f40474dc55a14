//! Scheduler configuration.
//!
//! Loaded from ~/.config/coachcal/config.toml. Everything has a default so
//! a missing file is fine. Display policies (how many cards a month cell
//! lists, which day weeks start on) live here rather than in code.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::navigate::ViewMode;

static DEFAULT_ROSTER_PATH: &str = "~/.local/share/coachcal/roster.json";

/// Month cells list this many sessions before collapsing into "+N sessions".
const DEFAULT_MAX_VISIBLE: usize = 2;

fn default_max_visible() -> usize {
    DEFAULT_MAX_VISIBLE
}

fn default_week_start() -> String {
    "sunday".to_string()
}

fn default_view() -> String {
    "week".to_string()
}

fn default_roster_path() -> String {
    DEFAULT_ROSTER_PATH.to_string()
}

/// Global configuration at ~/.config/coachcal/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Sessions listed per month cell before the "+N sessions" summary
    #[serde(default = "default_max_visible")]
    pub max_visible_sessions: usize,

    /// "sunday" or "monday" (any weekday name works)
    #[serde(default = "default_week_start")]
    pub week_start: String,

    /// View opened when none is given: "day", "week" or "month"
    #[serde(default = "default_view")]
    pub default_view: String,

    /// Where the roster file lives (~ expands)
    #[serde(default = "default_roster_path")]
    pub roster_path: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            max_visible_sessions: default_max_visible(),
            week_start: default_week_start(),
            default_view: default_view(),
            roster_path: default_roster_path(),
        }
    }
}

impl SchedulerConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("coachcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is absent.
    pub fn load() -> ScheduleResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(SchedulerConfig::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| ScheduleError::Config(format!("Could not read config file: {e}")))?;
        toml::from_str(&content)
            .map_err(|e| ScheduleError::Config(format!("Could not parse config file: {e}")))
    }

    /// Save the current config to ~/.config/coachcal/config.toml
    pub fn save(&self) -> ScheduleResult<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ScheduleError::Config(e.to_string()))?;

        std::fs::write(&path, content)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Parsed week start.
    pub fn week_start_day(&self) -> ScheduleResult<Weekday> {
        Weekday::from_str(&self.week_start).map_err(|_| {
            ScheduleError::Config(format!(
                "week_start '{}' is not a weekday name",
                self.week_start
            ))
        })
    }

    /// Parsed default view.
    pub fn default_view_mode(&self) -> ScheduleResult<ViewMode> {
        self.default_view.parse()
    }

    /// Roster path with ~ expanded.
    pub fn roster_file(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.roster_path).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_observed_policy() {
        let config = SchedulerConfig::default();
        assert_eq!(config.max_visible_sessions, 2);
        assert_eq!(config.week_start_day().unwrap(), Weekday::Sun);
        assert_eq!(config.default_view_mode().unwrap(), ViewMode::Week);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: SchedulerConfig = toml::from_str("max_visible_sessions = 4").unwrap();
        assert_eq!(config.max_visible_sessions, 4);
        assert_eq!(config.week_start, "sunday");
        assert_eq!(config.default_view, "week");
    }

    #[test]
    fn week_start_parses_weekday_names() {
        let mut config = SchedulerConfig::default();
        config.week_start = "monday".to_string();
        assert_eq!(config.week_start_day().unwrap(), Weekday::Mon);

        config.week_start = "someday".to_string();
        assert!(config.week_start_day().is_err());
    }

    #[test]
    fn bad_view_name_is_an_error() {
        let mut config = SchedulerConfig::default();
        config.default_view = "year".to_string();
        assert!(config.default_view_mode().is_err());
    }
}
