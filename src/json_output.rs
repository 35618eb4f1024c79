//! JSON output format for meeting-load reports
//!
//! `--format json` implementation

use crate::config::AnalysisConfig;
use crate::pipeline::Analysis;
use serde::Serialize;

/// Working-hours settings echoed into the output
#[derive(Debug, Clone, Serialize)]
pub struct JsonWorkWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub timezone: String,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub reference_user: String,
    pub work_window: JsonWorkWindow,
    /// `{"status": "no_data"}` or `{"status": "report", "report": {...}}`
    pub result: &'a Analysis,
}

impl<'a> JsonOutput<'a> {
    pub fn new(analysis: &'a Analysis, config: &AnalysisConfig) -> Self {
        let window = &config.work_window;
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "meetload-json-v1".to_string(),
            reference_user: config.reference_user.clone(),
            work_window: JsonWorkWindow {
                start_hour: window.start_hour,
                end_hour: window.end_hour,
                timezone: window.time_zone.name().to_string(),
            },
            result: analysis,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
