//! Human-readable report (default output format)

use crate::config::AnalysisConfig;
use crate::pipeline::Analysis;
use crate::stats::{round2, SummaryReport};

pub const NO_DATA_MESSAGE: &str =
    "No past meetings found where you are an attendee (and not declined).";

/// Render the analysis as plain text, one line per figure
pub fn render(analysis: &Analysis, config: &AnalysisConfig) -> String {
    match analysis {
        Analysis::NoData => format!("{}\n", NO_DATA_MESSAGE),
        Analysis::Report(report) => render_report(report, config),
    }
}

fn render_report(report: &SummaryReport, config: &AnalysisConfig) -> String {
    let window = &config.work_window;
    let tz = window.time_zone;
    let hours = format!("{}-{}", window.start_hour, window.end_hour);
    let all = &report.all;
    let outside = &report.outside;

    format!(
        "Range: {range_start} → {range_end} ({years} years)\n\
         Total meetings (you listed as attendee, not declined): {count} (for {user})\n\
         Meetings outside {hours}: {outside_count} ({meetings_pct}%)\n\
         Total hours in meetings: {total_hours}h\n\
         Hours outside {hours}: {outside_hours}h ({hours_pct}%)\n\
         \n\
         Averages (all meetings where you participated):\n\
         Per week: {all_week_meetings} meetings, {all_week_hours}h in meetings\n\
         Per month: {all_month_meetings} meetings, {all_month_hours}h in meetings\n\
         \n\
         Averages (outside working hours only):\n\
         Per week: {out_week_meetings} meetings, {out_week_hours}h\n\
         Per month: {out_month_meetings} meetings, {out_month_hours}h\n",
        range_start = report.range_start.with_timezone(&tz).format("%Y-%m-%d"),
        range_end = report.range_end.with_timezone(&tz).format("%Y-%m-%d"),
        years = report.span_years,
        count = report.meeting_count,
        user = config.reference_user,
        outside_count = report.outside_meeting_count,
        meetings_pct = report.meetings_outside_percent,
        total_hours = round2(report.total_hours),
        outside_hours = round2(report.outside_hours),
        hours_pct = report.hours_outside_percent,
        all_week_meetings = all.meetings_per_week,
        all_week_hours = all.hours_per_week,
        all_month_meetings = all.meetings_per_month,
        all_month_hours = all.hours_per_month,
        out_week_meetings = outside.meetings_per_week,
        out_week_hours = outside.hours_per_week,
        out_month_meetings = outside.meetings_per_month,
        out_month_hours = outside.hours_per_month,
    )
}
