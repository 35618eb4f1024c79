//! Meetload - meeting-load statistics from a personal calendar export
//!
//! This library filters calendar entries down to meetings a given person
//! attended, splits each meeting's duration into time inside and outside
//! local working hours, and folds the results into totals, percentages and
//! per-week/per-month averages.

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod duration;
pub mod error;
pub mod event;
pub mod filter;
pub mod ics;
pub mod json_output;
pub mod pipeline;
pub mod span;
pub mod stats;
pub mod text_output;

pub use config::{AnalysisConfig, WorkWindow};
pub use error::{MeetloadError, Result};
pub use event::{Attendee, CalendarEvent, EventKind, ResponseStatus};
pub use pipeline::{analyze, Analysis};
pub use stats::SummaryReport;
