//! Calendar-aware elapsed spans in weeks, months and years
//!
//! Whole units are counted by stepping the local wall-clock start forward
//! (month steps clamp the day of month, so Jan 31 + 1 month is Feb 29 in a
//! leap year). The remainder is expressed as a fraction of the length of the
//! next unit from the cursor, which makes a month after Feb 1 exactly 1.0
//! even though February is short.

use chrono::{DateTime, Datelike, Duration, LocalResult, Months, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

const MILLIS_PER_WEEK: f64 = 7.0 * 24.0 * 3_600_000.0;
const MILLIS_PER_MONTH: f64 = MILLIS_PER_YEAR / 12.0;
const MILLIS_PER_YEAR: f64 = 365.2425 * 24.0 * 3_600_000.0;

/// Place a local wall-clock time in `tz`
///
/// Ambiguous times (DST fall-back) take the earlier instant. Nonexistent
/// times (DST spring-forward gap) move one hour later.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}

/// Unit for [`calendar_diff`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanUnit {
    Weeks,
    Months,
    Years,
}

impl SpanUnit {
    fn average_millis(self) -> f64 {
        match self {
            Self::Weeks => MILLIS_PER_WEEK,
            Self::Months => MILLIS_PER_MONTH,
            Self::Years => MILLIS_PER_YEAR,
        }
    }

    /// Whole units between two local dates, possibly off by one
    fn estimate(self, from: &NaiveDateTime, to: &NaiveDateTime) -> i64 {
        let months = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
            - i64::from(from.month());
        match self {
            Self::Weeks => (*to - *from).num_days() / 7,
            Self::Months => months,
            Self::Years => months / 12,
        }
    }

    fn step(self, tz: Tz, from: &NaiveDateTime, n: i64) -> Option<DateTime<Tz>> {
        let n = u32::try_from(n).ok()?;
        let naive = match self {
            Self::Weeks => from.checked_add_signed(Duration::weeks(i64::from(n)))?,
            Self::Months => from.checked_add_months(Months::new(n))?,
            Self::Years => from.checked_add_months(Months::new(n.checked_mul(12)?))?,
        };
        resolve_local(tz, naive)
    }
}

/// Fractional number of `unit`s from `from` to `to`, measured in `tz`
///
/// Negative when `to` precedes `from`.
pub fn calendar_diff(from: DateTime<Utc>, to: DateTime<Utc>, unit: SpanUnit, tz: Tz) -> f64 {
    if to < from {
        return -calendar_diff(to, from, unit, tz);
    }

    let local_from = from.with_timezone(&tz).naive_local();
    let local_to = to.with_timezone(&tz).naive_local();
    let to_tz = to.with_timezone(&tz);

    let fixed = || (to - from).num_milliseconds() as f64 / unit.average_millis();

    let mut whole = unit.estimate(&local_from, &local_to).max(0);
    let mut cursor = match unit.step(tz, &local_from, whole) {
        Some(c) => c,
        None => return fixed(),
    };

    while cursor > to_tz && whole > 0 {
        whole -= 1;
        cursor = match unit.step(tz, &local_from, whole) {
            Some(c) => c,
            None => return fixed(),
        };
    }

    let next = loop {
        match unit.step(tz, &local_from, whole + 1) {
            Some(next) if next <= to_tz => {
                whole += 1;
                cursor = next;
            }
            Some(next) => break next,
            None => return fixed(),
        }
    };

    // whole == 0 with cursor after `to` only happens inside a DST gap
    let remaining = (to_tz - cursor).num_milliseconds().max(0) as f64;
    let unit_len = (next - cursor).num_milliseconds() as f64;
    if unit_len <= 0.0 {
        return fixed();
    }

    whole as f64 + remaining / unit_len
}

/// Elapsed history between the earliest meeting and `now`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    pub weeks: f64,
    pub months: f64,
    pub years: f64,
}

impl Span {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            weeks: calendar_diff(from, to, SpanUnit::Weeks, tz),
            months: calendar_diff(from, to, SpanUnit::Months, tz),
            years: calendar_diff(from, to, SpanUnit::Years, tz),
        }
    }

    /// Divisor-safe copy: weeks and months never below 1
    pub fn floored(&self) -> Self {
        Self {
            weeks: self.weeks.max(1.0),
            months: self.months.max(1.0),
            years: self.years,
        }
    }
}
