//! CSV output format for meeting-load reports
//!
//! One `metric,value` row per figure, for spreadsheets and scripts.

use crate::pipeline::Analysis;
use crate::stats::{round2, SummaryReport};

/// CSV report formatter
#[derive(Debug)]
pub struct CsvReportOutput {
    rows: Vec<(String, String)>,
}

impl CsvReportOutput {
    pub fn new(analysis: &Analysis) -> Self {
        let rows = match analysis {
            Analysis::NoData => vec![("status".to_string(), "no_data".to_string())],
            Analysis::Report(report) => Self::report_rows(report),
        };
        Self { rows }
    }

    fn report_rows(report: &SummaryReport) -> Vec<(String, String)> {
        let mut rows = vec![
            ("status".to_string(), "report".to_string()),
            ("range_start".to_string(), report.range_start.to_rfc3339()),
            ("range_end".to_string(), report.range_end.to_rfc3339()),
            ("span_years".to_string(), report.span_years.to_string()),
            ("meeting_count".to_string(), report.meeting_count.to_string()),
            (
                "outside_meeting_count".to_string(),
                report.outside_meeting_count.to_string(),
            ),
            (
                "total_hours".to_string(),
                round2(report.total_hours).to_string(),
            ),
            (
                "outside_hours".to_string(),
                round2(report.outside_hours).to_string(),
            ),
            (
                "meetings_outside_percent".to_string(),
                report.meetings_outside_percent.to_string(),
            ),
            (
                "hours_outside_percent".to_string(),
                report.hours_outside_percent.to_string(),
            ),
        ];

        for (prefix, averages) in [("all", &report.all), ("outside", &report.outside)] {
            rows.push((
                format!("{}_meetings_per_week", prefix),
                averages.meetings_per_week.to_string(),
            ));
            rows.push((
                format!("{}_hours_per_week", prefix),
                averages.hours_per_week.to_string(),
            ));
            rows.push((
                format!("{}_meetings_per_month", prefix),
                averages.meetings_per_month.to_string(),
            ));
            rows.push((
                format!("{}_hours_per_month", prefix),
                averages.hours_per_month.to_string(),
            ));
        }

        rows
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::from("metric,value\n");

        for (metric, value) in &self.rows {
            output.push_str(&Self::escape_field(metric));
            output.push(',');
            output.push_str(&Self::escape_field(value));
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::EventContribution;
    use crate::stats::RunningStats;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_no_data_csv() {
        let csv = CsvReportOutput::new(&Analysis::NoData).to_csv();
        assert_eq!(csv, "metric,value\nstatus,no_data\n");
    }

    #[test]
    fn test_report_csv_rows() {
        let mut stats = RunningStats::new();
        stats.record(
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            EventContribution {
                total_hours: 1.0 / 3.0,
                outside_hours: 0.0,
            },
        );
        let now = Utc.with_ymd_and_hms(2024, 1, 29, 9, 0, 0).unwrap();
        let analysis = Analysis::Report(stats.summarize(now, chrono_tz::UTC).unwrap());

        let csv = CsvReportOutput::new(&analysis).to_csv();
        assert!(csv.starts_with("metric,value\nstatus,report\n"));
        assert!(csv.contains("\nmeeting_count,1\n"));
        assert!(csv.contains("\ntotal_hours,0.33\n"));
        assert!(csv.contains("\nall_meetings_per_week,0.25\n"));
        assert!(csv.contains("\noutside_hours_per_month,0\n"));
        // header + status + 9 scalar rows + 8 averages
        assert_eq!(csv.lines().count(), 19);
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(CsvReportOutput::escape_field("plain"), "plain");
        assert_eq!(CsvReportOutput::escape_field("a,b"), "\"a,b\"");
        assert_eq!(CsvReportOutput::escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
