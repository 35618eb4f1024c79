//! Meeting-load statistics: running totals and the final summary
//!
//! Accumulation keeps full floating-point precision. Rounding to two decimals
//! (half away from zero) is applied only to derived report figures.

use crate::duration::EventContribution;
use crate::span::Span;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Round to two decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `part` in `whole`, rounded; 0 when `whole` is 0
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round2(part / whole * 100.0)
}

/// Running totals for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningStats {
    pub meeting_count: u64,
    pub outside_meeting_count: u64,
    pub total_hours: f64,
    pub outside_hours: f64,
    pub earliest_start: Option<DateTime<Utc>>,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one qualifying meeting; zero contributions are ignored
    pub fn record(&mut self, start: DateTime<Utc>, contribution: EventContribution) {
        if contribution.is_zero() {
            return;
        }

        self.meeting_count += 1;
        self.total_hours += contribution.total_hours;

        if contribution.outside_hours > 0.0 {
            self.outside_meeting_count += 1;
            self.outside_hours += contribution.outside_hours;
        }

        self.earliest_start = Some(match self.earliest_start {
            Some(current) => current.min(start),
            None => start,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.earliest_start.is_none()
    }

    /// Produce the report, or `None` when nothing qualified
    pub fn summarize(&self, now: DateTime<Utc>, tz: Tz) -> Option<SummaryReport> {
        let earliest = self.earliest_start?;
        let raw = Span::between(earliest, now, tz);
        let span = raw.floored();

        let meetings = self.meeting_count as f64;
        let outside_meetings = self.outside_meeting_count as f64;

        Some(SummaryReport {
            range_start: earliest,
            range_end: now,
            span_years: round2(raw.years),
            span_weeks: span.weeks,
            span_months: span.months,
            meeting_count: self.meeting_count,
            outside_meeting_count: self.outside_meeting_count,
            total_hours: self.total_hours,
            outside_hours: self.outside_hours,
            meetings_outside_percent: percent(outside_meetings, meetings),
            hours_outside_percent: percent(self.outside_hours, self.total_hours),
            all: Averages::over(meetings, self.total_hours, &span),
            outside: Averages::over(outside_meetings, self.outside_hours, &span),
        })
    }
}

/// Per-week and per-month averages for one subset of meetings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    pub meetings_per_week: f64,
    pub hours_per_week: f64,
    pub meetings_per_month: f64,
    pub hours_per_month: f64,
}

impl Averages {
    fn over(meetings: f64, hours: f64, span: &Span) -> Self {
        Self {
            meetings_per_week: round2(meetings / span.weeks),
            hours_per_week: round2(hours / span.weeks),
            meetings_per_month: round2(meetings / span.months),
            hours_per_month: round2(hours / span.months),
        }
    }
}

/// Final statistics for one run
///
/// `total_hours` and `outside_hours` are unrounded; everything derived is
/// already rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
    pub span_years: f64,
    /// Divisor used for weekly averages (at least 1)
    pub span_weeks: f64,
    /// Divisor used for monthly averages (at least 1)
    pub span_months: f64,
    pub meeting_count: u64,
    pub outside_meeting_count: u64,
    pub total_hours: f64,
    pub outside_hours: f64,
    pub meetings_outside_percent: f64,
    pub hours_outside_percent: f64,
    /// Averages over every counted meeting
    pub all: Averages,
    /// Averages over meetings with time outside working hours
    pub outside: Averages,
}
