//! iCalendar ingestion
//!
//! Turns ICS text into [`CalendarEvent`] records using the `ical` crate.
//! Grammar errors fail the whole read. Problems with individual values
//! (unparseable DTSTART, unknown TZID) only leave the affected field empty so
//! the filter drops the event later.
//!
//! ## Example
//!
//! ```no_run
//! use meetload::ics::parse_ics_file;
//!
//! let events = parse_ics_file("calendar.ics", chrono_tz::Europe::Stockholm)?;
//! println!("Found {} entries", events.len());
//! # Ok::<(), meetload::MeetloadError>(())
//! ```

use crate::error::{MeetloadError, Result};
use crate::event::{Attendee, CalendarEvent, EventKind, ResponseStatus};
use crate::span::resolve_local;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use ical::property::Property;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse an ICS file from disk
///
/// Floating times and unknown TZIDs are read in `default_tz`.
pub fn parse_ics_file<P: AsRef<Path>>(path: P, default_tz: Tz) -> Result<Vec<CalendarEvent>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MeetloadError::read_error(path, e))?;

    let events = parse_ics_reader(BufReader::new(file), default_tz)?;
    tracing::debug!(path = %path.display(), entries = events.len(), "parsed calendar");
    Ok(events)
}

/// Parse ICS text held in memory
pub fn parse_ics_str(text: &str, default_tz: Tz) -> Result<Vec<CalendarEvent>> {
    parse_ics_reader(text.as_bytes(), default_tz)
}

/// Parse ICS data from any buffered reader
///
/// Entries are keyed by UID: a repeated UID merges into the first entry,
/// and RECURRENCE-ID overrides of a known base are dropped.
pub fn parse_ics_reader<R: BufRead>(reader: R, default_tz: Tz) -> Result<Vec<CalendarEvent>> {
    let mut components = Vec::new();

    for calendar in ical::IcalParser::new(reader) {
        let calendar = calendar.map_err(|e| MeetloadError::Parse(e.to_string()))?;

        for event in &calendar.events {
            components.push(parse_component(&event.properties, EventKind::Event, default_tz));
        }

        for todo in &calendar.todos {
            components.push(parse_component(&todo.properties, EventKind::Todo, default_tz));
        }

        for journal in &calendar.journals {
            components.push(parse_component(&journal.properties, EventKind::Other, default_tz));
        }
    }

    Ok(collapse_by_uid(components))
}

/// One parsed component before UID collapsing
#[derive(Debug, Clone)]
struct Component {
    uid: Option<String>,
    recurrence_id: Option<String>,
    event: CalendarEvent,
}

fn collapse_by_uid(components: Vec<Component>) -> Vec<CalendarEvent> {
    let bases: HashSet<String> = components
        .iter()
        .filter(|c| c.recurrence_id.is_none())
        .filter_map(|c| c.uid.clone())
        .collect();

    let mut events: Vec<CalendarEvent> = Vec::with_capacity(components.len());
    let mut by_uid: HashMap<String, usize> = HashMap::new();

    for component in components {
        let Some(uid) = component.uid else {
            events.push(component.event);
            continue;
        };

        if let Some(recurrence_id) = component.recurrence_id {
            if bases.contains(&uid) {
                tracing::trace!(
                    uid = %uid,
                    recurrence_id = %recurrence_id,
                    "dropping recurrence override"
                );
            } else {
                events.push(component.event);
            }
            continue;
        }

        match by_uid.get(&uid) {
            Some(&index) => {
                tracing::debug!(uid = %uid, "merging repeated UID");
                merge_into(&mut events[index], component.event);
            }
            None => {
                by_uid.insert(uid, events.len());
                events.push(component.event);
            }
        }
    }

    events
}

/// Fields present on `later` replace those on `earlier`
fn merge_into(earlier: &mut CalendarEvent, later: CalendarEvent) {
    earlier.kind = later.kind;
    if later.summary.is_some() {
        earlier.summary = later.summary;
    }
    if later.start.is_some() {
        earlier.start = later.start;
        earlier.end = later.end;
    } else if later.end.is_some() {
        earlier.end = later.end;
    }
    if !later.attendees.is_empty() {
        earlier.attendees = later.attendees;
    }
}

/// A parsed DTSTART/DTEND value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParsedTime {
    at: DateTime<Utc>,
    date_only: bool,
}

fn parse_component(properties: &[Property], kind: EventKind, tz: Tz) -> Component {
    let mut uid = None;
    let mut recurrence_id = None;
    let mut summary = None;
    let mut start: Option<ParsedTime> = None;
    let mut end: Option<ParsedTime> = None;
    let mut duration = None;
    let mut attendees = Vec::new();

    for property in properties {
        let Some(value) = property.value.as_deref() else {
            continue;
        };

        match property.name.to_ascii_uppercase().as_str() {
            "UID" => uid = Some(value.trim().to_string()),
            "RECURRENCE-ID" => recurrence_id = Some(value.trim().to_string()),
            "SUMMARY" => summary = Some(value.to_string()),
            "DTSTART" => start = parse_instant(value, property, tz),
            "DTEND" | "DUE" => end = parse_instant(value, property, tz),
            "DURATION" => duration = parse_duration(value),
            "ATTENDEE" => attendees.push(parse_attendee(value, property)),
            _ => {}
        }
    }

    if start.is_none() {
        tracing::debug!(summary = ?summary, "entry without a usable DTSTART");
    }

    let end = match (start, end, duration) {
        (_, Some(end), _) => Some(end.at),
        (Some(start), None, Some(duration)) => start.at.checked_add_signed(duration),
        (Some(start), None, None) if start.date_only => Some(start.at + Duration::days(1)),
        (Some(start), None, None) => Some(start.at),
        (None, None, _) => None,
    };

    Component {
        uid,
        recurrence_id,
        event: CalendarEvent {
            kind,
            summary,
            start: start.map(|s| s.at),
            end,
            attendees,
        },
    }
}

fn param<'a>(property: &'a Property, name: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(|v| v.trim_matches('"'))
}

fn parse_attendee(value: &str, property: &Property) -> Attendee {
    let value = value.trim();
    let address = match value.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("mailto:") => &value[7..],
        _ => value,
    };

    let status = param(property, "PARTSTAT")
        .map(ResponseStatus::from_partstat)
        .unwrap_or_default();

    Attendee::new(address, status)
}

/// Windows zone names seen in Outlook and Exchange exports
const WINDOWS_ZONES: &[(&str, &str)] = &[
    ("GMT Standard Time", "Europe/London"),
    ("Greenwich Standard Time", "Atlantic/Reykjavik"),
    ("W. Europe Standard Time", "Europe/Berlin"),
    ("Central Europe Standard Time", "Europe/Budapest"),
    ("Central European Standard Time", "Europe/Warsaw"),
    ("Romance Standard Time", "Europe/Paris"),
    ("E. Europe Standard Time", "Europe/Chisinau"),
    ("FLE Standard Time", "Europe/Helsinki"),
    ("GTB Standard Time", "Europe/Bucharest"),
    ("Russian Standard Time", "Europe/Moscow"),
    ("Turkey Standard Time", "Europe/Istanbul"),
    ("Israel Standard Time", "Asia/Jerusalem"),
    ("Egypt Standard Time", "Africa/Cairo"),
    ("South Africa Standard Time", "Africa/Johannesburg"),
    ("W. Central Africa Standard Time", "Africa/Lagos"),
    ("Arabian Standard Time", "Asia/Dubai"),
    ("India Standard Time", "Asia/Kolkata"),
    ("China Standard Time", "Asia/Shanghai"),
    ("Singapore Standard Time", "Asia/Singapore"),
    ("Tokyo Standard Time", "Asia/Tokyo"),
    ("Korea Standard Time", "Asia/Seoul"),
    ("AUS Eastern Standard Time", "Australia/Sydney"),
    ("New Zealand Standard Time", "Pacific/Auckland"),
    ("Eastern Standard Time", "America/New_York"),
    ("Central Standard Time", "America/Chicago"),
    ("Central Standard Time (Mexico)", "America/Mexico_City"),
    ("Mountain Standard Time", "America/Denver"),
    ("US Mountain Standard Time", "America/Phoenix"),
    ("Pacific Standard Time", "America/Los_Angeles"),
    ("Alaskan Standard Time", "America/Anchorage"),
    ("Hawaiian Standard Time", "Pacific/Honolulu"),
    ("Atlantic Standard Time", "America/Halifax"),
    ("SA Pacific Standard Time", "America/Bogota"),
    ("Pacific SA Standard Time", "America/Santiago"),
    ("Argentina Standard Time", "America/Argentina/Buenos_Aires"),
    ("E. South America Standard Time", "America/Sao_Paulo"),
    ("UTC", "UTC"),
];

/// Resolve a TZID: IANA name first, then the Windows name table
fn lookup_zone(tzid: &str) -> Option<Tz> {
    let name = tzid.trim().trim_start_matches('/');
    if let Ok(tz) = name.parse::<Tz>() {
        return Some(tz);
    }

    WINDOWS_ZONES
        .iter()
        .find(|(windows, _)| windows.eq_ignore_ascii_case(name))
        .and_then(|(_, iana)| iana.parse::<Tz>().ok())
}

fn zone_for(property: &Property, default_tz: Tz) -> Tz {
    match param(property, "TZID") {
        Some(tzid) => lookup_zone(tzid).unwrap_or_else(|| {
            tracing::warn!(tzid, fallback = %default_tz, "unknown TZID");
            default_tz
        }),
        None => default_tz,
    }
}

fn parse_instant(value: &str, property: &Property, default_tz: Tz) -> Option<ParsedTime> {
    let value = value.trim();
    let date_param = param(property, "VALUE").is_some_and(|v| v.eq_ignore_ascii_case("DATE"));

    if date_param || value.len() == 8 {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
        let at = resolve_local(zone_for(property, default_tz), date.and_hms_opt(0, 0, 0)?)?;
        return Some(ParsedTime {
            at: at.with_timezone(&Utc),
            date_only: true,
        });
    }

    let at = if let Some(utc) = value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S")
            .ok()?
            .and_utc()
    } else {
        let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;
        resolve_local(zone_for(property, default_tz), naive)?.with_timezone(&Utc)
    };

    Some(ParsedTime {
        at,
        date_only: false,
    })
}

/// Parse an RFC 5545 DURATION such as `PT1H30M`, `P1D` or `-P2W`
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (negative, rest) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    let rest = rest.strip_prefix('P').or_else(|| rest.strip_prefix('p'))?;

    let mut total = Duration::zero();
    let mut number = String::new();
    let mut in_time = false;
    let mut saw_unit = false;

    for c in rest.chars() {
        match c.to_ascii_uppercase() {
            '0'..='9' => number.push(c),
            'T' if number.is_empty() && !in_time => in_time = true,
            unit => {
                let n: i64 = number.parse().ok()?;
                number.clear();
                let part = match (unit, in_time) {
                    ('W', false) => Duration::try_weeks(n)?,
                    ('D', false) => Duration::try_days(n)?,
                    ('H', true) => Duration::try_hours(n)?,
                    ('M', true) => Duration::try_minutes(n)?,
                    ('S', true) => Duration::try_seconds(n)?,
                    _ => return None,
                };
                total = total.checked_add(&part)?;
                saw_unit = true;
            }
        }
    }

    if !number.is_empty() || !saw_unit {
        return None;
    }

    Some(if negative { -total } else { total })
}
