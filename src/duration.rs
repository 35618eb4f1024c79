//! Duration splitting: inside vs outside working hours
//!
//! The working window is anchored to the local calendar date of the event
//! start, even when the event runs past midnight. Entries of 8 hours or more
//! are treated as all-day or out-of-office blocks and contribute nothing.

use crate::config::WorkWindow;
use crate::span::resolve_local;
use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

/// Events at or above this length are not timed meetings
pub const MAX_MEETING_HOURS: f64 = 8.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Per-event hour counts; `outside_hours <= total_hours`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EventContribution {
    pub total_hours: f64,
    pub outside_hours: f64,
}

impl EventContribution {
    pub const ZERO: Self = Self {
        total_hours: 0.0,
        outside_hours: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        self.total_hours == 0.0
    }
}

/// Split an event's duration into total and outside-working-hours hours
pub fn split_duration(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    window: &WorkWindow,
) -> EventContribution {
    let tz = window.time_zone;
    let local_start = start.with_timezone(&tz);

    let total_ms = (end - start).num_milliseconds();
    let total_hours = total_ms as f64 / MILLIS_PER_HOUR;

    if total_hours <= 0.0 || total_hours >= MAX_MEETING_HOURS {
        return EventContribution::ZERO;
    }

    let day = local_start.date_naive();
    let bounds = NaiveTime::from_hms_opt(window.start_hour, 0, 0)
        .zip(NaiveTime::from_hms_opt(window.end_hour, 0, 0))
        .and_then(|(open, close)| {
            resolve_local(tz, day.and_time(open)).zip(resolve_local(tz, day.and_time(close)))
        });

    let Some((work_start, work_end)) = bounds else {
        tracing::warn!(%start, "could not place working window in local time");
        return EventContribution::ZERO;
    };

    let inside_start = start.max(work_start.with_timezone(&Utc));
    let inside_end = end.min(work_end.with_timezone(&Utc));
    let inside_ms = (inside_end - inside_start).num_milliseconds().max(0);

    EventContribution {
        total_hours,
        outside_hours: (total_ms - inside_ms) as f64 / MILLIS_PER_HOUR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Stockholm;
    use chrono_tz::Tz;

    fn window() -> WorkWindow {
        WorkWindow::new(8, 17, Stockholm).unwrap()
    }

    fn local(tz: Tz, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        tz.with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_meeting_inside_hours() {
        let c = split_duration(
            local(Stockholm, 2024, 3, 5, 9, 0),
            local(Stockholm, 2024, 3, 5, 10, 0),
            &window(),
        );
        assert_eq!(c.total_hours, 1.0);
        assert_eq!(c.outside_hours, 0.0);
    }

    #[test]
    fn test_meeting_straddling_window_start() {
        let c = split_duration(
            local(Stockholm, 2024, 3, 5, 7, 0),
            local(Stockholm, 2024, 3, 5, 9, 0),
            &window(),
        );
        assert_eq!(c.total_hours, 2.0);
        assert_eq!(c.outside_hours, 1.0);
    }

    #[test]
    fn test_meeting_straddling_window_end() {
        let c = split_duration(
            local(Stockholm, 2024, 3, 5, 16, 30),
            local(Stockholm, 2024, 3, 5, 18, 0),
            &window(),
        );
        assert_eq!(c.total_hours, 1.5);
        assert_eq!(c.outside_hours, 1.0);
    }

    #[test]
    fn test_meeting_fully_outside() {
        let c = split_duration(
            local(Stockholm, 2024, 3, 5, 19, 0),
            local(Stockholm, 2024, 3, 5, 20, 15),
            &window(),
        );
        assert_eq!(c.total_hours, 1.25);
        assert_eq!(c.outside_hours, 1.25);
    }

    #[test]
    fn test_eight_hours_is_excluded() {
        let c = split_duration(
            local(Stockholm, 2024, 3, 5, 9, 0),
            local(Stockholm, 2024, 3, 5, 17, 0),
            &window(),
        );
        assert_eq!(c, EventContribution::ZERO);
        assert!(c.is_zero());
    }

    #[test]
    fn test_just_under_eight_hours_counts() {
        let c = split_duration(
            local(Stockholm, 2024, 3, 5, 9, 0),
            local(Stockholm, 2024, 3, 5, 16, 59),
            &window(),
        );
        assert!(c.total_hours > 7.9);
        assert_eq!(c.outside_hours, 0.0);
    }

    #[test]
    fn test_zero_and_negative_durations_excluded() {
        let t = local(Stockholm, 2024, 3, 5, 9, 0);
        assert_eq!(split_duration(t, t, &window()), EventContribution::ZERO);
        assert_eq!(
            split_duration(t, t - chrono::Duration::hours(1), &window()),
            EventContribution::ZERO
        );
    }

    #[test]
    fn test_window_anchored_to_start_date_across_midnight() {
        // 22:00 -> 02:00 next day: the next morning's window is never consulted
        let c = split_duration(
            local(Stockholm, 2024, 3, 5, 22, 0),
            local(Stockholm, 2024, 3, 6, 2, 0),
            &window(),
        );
        assert_eq!(c.total_hours, 4.0);
        assert_eq!(c.outside_hours, 4.0);
    }

    #[test]
    fn test_window_uses_local_wall_clock() {
        // 08:00 UTC is 09:00 in Stockholm (winter) and inside hours there,
        // but 03:00 in New York and outside hours there.
        let start = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();

        let stockholm = split_duration(start, end, &window());
        assert_eq!(stockholm.outside_hours, 0.0);

        let ny = WorkWindow::new(8, 17, chrono_tz::America::New_York).unwrap();
        let new_york = split_duration(start, end, &ny);
        assert_eq!(new_york.outside_hours, 1.0);
    }

    #[test]
    fn test_dst_day_window() {
        // Spring forward in Stockholm on 2024-03-31; 08:00 local is CEST
        let c = split_duration(
            local(Stockholm, 2024, 3, 31, 7, 0),
            local(Stockholm, 2024, 3, 31, 9, 0),
            &window(),
        );
        assert_eq!(c.total_hours, 2.0);
        assert_eq!(c.outside_hours, 1.0);
    }
}
