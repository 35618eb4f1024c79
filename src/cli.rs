//! CLI argument parsing for meetload

use crate::config::ConfigFile;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "meetload")]
#[command(version)]
#[command(about = "Meeting-load statistics from an iCalendar export", long_about = None)]
pub struct Cli {
    /// Calendar export to analyze (.ics)
    #[arg(value_name = "ICS")]
    pub calendar: PathBuf,

    /// Your calendar email address
    #[arg(short = 'u', long = "email", value_name = "EMAIL")]
    pub email: Option<String>,

    /// First working hour, local time (default: 8)
    #[arg(long = "work-start", value_name = "HOUR")]
    pub work_start: Option<u32>,

    /// Hour working time ends, local time (default: 17)
    #[arg(long = "work-end", value_name = "HOUR")]
    pub work_end: Option<u32>,

    /// IANA time zone for working hours (default: Europe/Stockholm)
    #[arg(long = "timezone", value_name = "TZ")]
    pub timezone: Option<String>,

    /// TOML configuration file; command-line flags take precedence
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reference time for the report (RFC 3339), defaults to the current time
    #[arg(long = "now", value_name = "TIMESTAMP")]
    pub now: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Configuration values given on the command line
    pub fn config_overrides(&self) -> ConfigFile {
        ConfigFile {
            email: self.email.clone(),
            work_start_hour: self.work_start,
            work_end_hour: self.work_end,
            timezone: self.timezone.clone(),
        }
    }
}
