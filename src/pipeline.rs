//! Filter, split and fold a calendar into a [`SummaryReport`]

use crate::config::AnalysisConfig;
use crate::duration::split_duration;
use crate::event::CalendarEvent;
use crate::filter::MeetingFilter;
use crate::stats::{RunningStats, SummaryReport};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "report", rename_all = "snake_case")]
pub enum Analysis {
    /// No past meeting qualified
    NoData,
    Report(SummaryReport),
}

impl Analysis {
    pub fn report(&self) -> Option<&SummaryReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::NoData => None,
        }
    }
}

/// Fold `events` in order into running totals
pub fn accumulate(
    events: &[CalendarEvent],
    config: &AnalysisConfig,
    now: DateTime<Utc>,
) -> RunningStats {
    let filter = MeetingFilter::new(&config.reference_user, now);
    let mut stats = RunningStats::new();

    for event in events {
        if let Err(reason) = filter.check(event) {
            tracing::trace!(summary = ?event.summary, reason = reason.as_str(), "skipping event");
            continue;
        }

        // check() guarantees both instants are present
        let (Some(start), Some(end)) = (event.start, event.end) else {
            continue;
        };

        let contribution = split_duration(start, end, &config.work_window);
        if contribution.is_zero() {
            tracing::debug!(
                summary = ?event.summary,
                %start,
                %end,
                "skipping event: zero or all-day duration"
            );
            continue;
        }

        stats.record(start, contribution);
    }

    stats
}

/// Run the whole pipeline
pub fn analyze(events: &[CalendarEvent], config: &AnalysisConfig, now: DateTime<Utc>) -> Analysis {
    let stats = accumulate(events, config, now);

    tracing::info!(
        events = events.len(),
        meetings = stats.meeting_count,
        outside = stats.outside_meeting_count,
        "analysis complete"
    );

    match stats.summarize(now, config.work_window.time_zone) {
        Some(report) => Analysis::Report(report),
        None => Analysis::NoData,
    }
}
