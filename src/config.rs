//! Run configuration: reference user and working-hours window
//!
//! Configuration is a plain value passed into the pipeline. It can be built
//! in code, loaded from a TOML file, and overridden from the command line.
//!
//! # Example meetload.toml
//!
//! ```toml
//! email = "name@example.org"
//! work_start_hour = 8
//! work_end_hour = 17
//! timezone = "Europe/Stockholm"
//! ```

use crate::error::{MeetloadError, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_WORK_START_HOUR: u32 = 8;
pub const DEFAULT_WORK_END_HOUR: u32 = 17;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Stockholm;

/// Daily working-hours boundary in a local time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub time_zone: Tz,
}

impl Default for WorkWindow {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_WORK_START_HOUR,
            end_hour: DEFAULT_WORK_END_HOUR,
            time_zone: DEFAULT_TIMEZONE,
        }
    }
}

impl WorkWindow {
    /// Build a validated window
    pub fn new(start_hour: u32, end_hour: u32, time_zone: Tz) -> Result<Self> {
        let window = Self {
            start_hour,
            end_hour,
            time_zone,
        };
        window.validate()?;
        Ok(window)
    }

    /// Validate hour bounds (0 <= start < end <= 23)
    pub fn validate(&self) -> Result<()> {
        if self.end_hour > 23 {
            return Err(MeetloadError::config(format!(
                "work_end_hour must be <= 23, got {}",
                self.end_hour
            )));
        }

        if self.start_hour >= self.end_hour {
            return Err(MeetloadError::config(format!(
                "work_start_hour ({}) must be before work_end_hour ({})",
                self.start_hour, self.end_hour
            )));
        }

        Ok(())
    }
}

/// Everything the core needs besides the events and `now`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Email address whose participation is counted
    pub reference_user: String,
    pub work_window: WorkWindow,
}

impl AnalysisConfig {
    pub fn new(reference_user: impl Into<String>, work_window: WorkWindow) -> Result<Self> {
        let config = Self {
            reference_user: reference_user.into(),
            work_window,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.reference_user.contains('@') {
            return Err(MeetloadError::config(format!(
                "email must be an address containing '@', got {:?}",
                self.reference_user
            )));
        }

        self.work_window.validate()
    }
}

/// On-disk representation; every field optional so CLI flags can fill gaps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub email: Option<String>,
    pub work_start_hour: Option<u32>,
    pub work_end_hour: Option<u32>,
    pub timezone: Option<String>,
}

impl ConfigFile {
    /// Load a configuration file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| MeetloadError::read_error(path, e))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MeetloadError::config(e.to_string()))
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            email: other.email.or(self.email),
            work_start_hour: other.work_start_hour.or(self.work_start_hour),
            work_end_hour: other.work_end_hour.or(self.work_end_hour),
            timezone: other.timezone.or(self.timezone),
        }
    }

    /// Resolve into a validated [`AnalysisConfig`], applying defaults
    pub fn resolve(self) -> Result<AnalysisConfig> {
        let email = self
            .email
            .ok_or_else(|| MeetloadError::config("email is required (use --email or config file)"))?;

        let time_zone = match self.timezone {
            Some(name) => parse_time_zone(&name)?,
            None => DEFAULT_TIMEZONE,
        };

        let window = WorkWindow::new(
            self.work_start_hour.unwrap_or(DEFAULT_WORK_START_HOUR),
            self.work_end_hour.unwrap_or(DEFAULT_WORK_END_HOUR),
            time_zone,
        )?;

        AnalysisConfig::new(email, window)
    }
}

/// Parse an IANA time zone identifier such as `Europe/Stockholm`
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| MeetloadError::config(format!("unknown timezone {:?}: {}", name, e)))
}
