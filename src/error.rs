//! Error types for meetload
//!
//! Only the edges of the pipeline can fail: reading the calendar, parsing its
//! grammar, and loading configuration. The fold itself is infallible.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for meetload operations
pub type Result<T> = std::result::Result<T, MeetloadError>;

/// Errors raised at the ingestion and configuration boundaries
#[derive(Error, Debug)]
pub enum MeetloadError {
    /// Failed to read a file from disk
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The calendar text is not valid iCalendar
    #[error("Invalid calendar data: {0}")]
    Parse(String),

    /// Configuration value out of range or malformed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MeetloadError {
    /// Create a read error for `path`
    #[must_use = "returns MeetloadError for file read failures"]
    pub fn read_error<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use = "returns MeetloadError for invalid configuration"]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_mentions_path() {
        let err = MeetloadError::read_error(
            "/tmp/missing.ics",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing.ics"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_config_error_display() {
        let err = MeetloadError::config("work_end_hour must be <= 23, got 24");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: work_end_hour must be <= 23, got 24"
        );
    }
}
