//! Property-based tests for the filter, splitter and aggregator invariants
//!
//! Uses proptest to check that:
//! 1. Entries without attendees never qualify
//! 2. A declined reference user never qualifies, whatever others answered
//! 3. Durations <= 0 or >= 8 hours contribute nothing
//! 4. 0 <= outside_hours <= total_hours for every split
//! 5. Running totals keep outside counts and hours within the overall ones

use chrono::{DateTime, Duration, TimeZone, Utc};
use meetload::config::WorkWindow;
use meetload::duration::{split_duration, EventContribution};
use meetload::filter::is_qualifying_meeting;
use meetload::stats::{percent, RunningStats};
use meetload::{CalendarEvent, ResponseStatus};
use proptest::prelude::*;

const USER: &str = "name@example.org";

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

fn status_strategy() -> impl Strategy<Value = ResponseStatus> {
    prop_oneof![
        Just(ResponseStatus::Accepted),
        Just(ResponseStatus::Tentative),
        Just(ResponseStatus::Declined),
        Just(ResponseStatus::NeedsAction),
        Just(ResponseStatus::Unknown),
    ]
}

fn zone_strategy() -> impl Strategy<Value = chrono_tz::Tz> {
    prop_oneof![
        Just(chrono_tz::Europe::Stockholm),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::Asia::Kolkata),
        Just(chrono_tz::Australia::Lord_Howe),
        Just(chrono_tz::UTC),
    ]
}

fn window_strategy() -> impl Strategy<Value = WorkWindow> {
    (0u32..23, 1u32..24, zone_strategy()).prop_filter_map(
        "start must precede end",
        |(start, end, tz)| WorkWindow::new(start, end, tz).ok(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_no_attendees_never_qualifies(
        offset_min in 0i64..1_000_000,
        length_min in 1i64..600,
    ) {
        let start = base() + Duration::minutes(offset_min);
        let event = CalendarEvent::new(start, start + Duration::minutes(length_min));
        prop_assert!(!is_qualifying_meeting(&event, USER, now()));
    }

    #[test]
    fn prop_declined_user_never_qualifies(
        before in prop::collection::vec(status_strategy(), 0..5),
        after in prop::collection::vec(status_strategy(), 0..5),
    ) {
        let start = base() + Duration::days(10);
        let mut event = CalendarEvent::new(start, start + Duration::hours(1));
        for (i, status) in before.iter().enumerate() {
            event = event.with_attendee(&format!("before{}@example.org", i), *status);
        }
        event = event.with_attendee(USER, ResponseStatus::Declined);
        for status in &after {
            event = event.with_attendee(USER, *status);
        }

        prop_assert!(!is_qualifying_meeting(&event, USER, now()));
    }

    #[test]
    fn prop_degenerate_durations_contribute_nothing(
        offset_min in 0i64..1_000_000,
        length_min in prop_oneof![-600i64..=0, 480i64..5000],
        window in window_strategy(),
    ) {
        let start = base() + Duration::minutes(offset_min);
        let end = start + Duration::minutes(length_min);
        prop_assert_eq!(split_duration(start, end, &window), EventContribution::ZERO);
    }

    #[test]
    fn prop_outside_within_total(
        offset_min in 0i64..1_000_000,
        length_min in 1i64..480,
        window in window_strategy(),
    ) {
        let start = base() + Duration::minutes(offset_min);
        let end = start + Duration::minutes(length_min);
        let c = split_duration(start, end, &window);

        prop_assert!(c.total_hours > 0.0);
        prop_assert!(c.total_hours < 8.0);
        prop_assert!(c.outside_hours >= 0.0);
        prop_assert!(c.outside_hours <= c.total_hours);
    }

    #[test]
    fn prop_running_stats_invariants(
        parts in prop::collection::vec((0.0f64..8.0, 0.0f64..1.0, 0i64..100_000), 0..50),
    ) {
        let mut stats = RunningStats::new();
        let mut last_total = 0.0;
        let mut last_outside = 0.0;

        for (total, share, offset) in parts {
            stats.record(
                base() + Duration::minutes(offset),
                EventContribution { total_hours: total, outside_hours: total * share },
            );

            prop_assert!(stats.outside_meeting_count <= stats.meeting_count);
            prop_assert!(stats.outside_hours <= stats.total_hours + 1e-9);
            prop_assert!(stats.total_hours >= last_total);
            prop_assert!(stats.outside_hours >= last_outside);
            last_total = stats.total_hours;
            last_outside = stats.outside_hours;
        }
    }

    #[test]
    fn prop_percent_of_zero_whole_is_zero(part in -1e9f64..1e9) {
        prop_assert_eq!(percent(part, 0.0), 0.0);
    }

    #[test]
    fn prop_summary_averages_are_finite(
        offsets in prop::collection::vec(0i64..1_000_000, 1..30),
    ) {
        let mut stats = RunningStats::new();
        for offset in &offsets {
            stats.record(
                base() + Duration::minutes(*offset),
                EventContribution { total_hours: 1.0, outside_hours: 0.5 },
            );
        }

        let report = stats.summarize(now(), chrono_tz::Europe::Stockholm).unwrap();
        prop_assert!(report.span_weeks >= 1.0);
        prop_assert!(report.span_months >= 1.0);
        prop_assert!(report.all.meetings_per_week.is_finite());
        prop_assert!(report.outside.hours_per_month.is_finite());
        prop_assert!(report.outside.meetings_per_week <= report.all.meetings_per_week);
    }
}
