//! Calendar event records as seen by the analysis core
//!
//! These are produced by the ingestion layer ([`crate::ics`]) and never
//! mutated afterwards. Attendee shape is already normalized: one attendee or
//! many, the core always sees an ordered `Vec`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Component type of a calendar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// VEVENT
    Event,
    /// VTODO
    Todo,
    /// VJOURNAL or anything else the feed carries
    Other,
}

/// Participation status of an attendee (iCalendar PARTSTAT)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Accepted,
    Tentative,
    Declined,
    NeedsAction,
    /// Missing or unrecognized PARTSTAT
    #[default]
    Unknown,
}

impl ResponseStatus {
    /// Map a PARTSTAT parameter value, case-insensitively
    pub fn from_partstat(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ACCEPTED" => Self::Accepted,
            "TENTATIVE" => Self::Tentative,
            "DECLINED" => Self::Declined,
            "NEEDS-ACTION" | "NEEDS_ACTION" => Self::NeedsAction,
            _ => Self::Unknown,
        }
    }
}

/// A single attendee entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Calendar address with any `mailto:` scheme removed
    pub address: String,
    #[serde(default)]
    pub response_status: ResponseStatus,
}

impl Attendee {
    pub fn new(address: impl Into<String>, response_status: ResponseStatus) -> Self {
        Self {
            address: address.into(),
            response_status,
        }
    }
}

/// A calendar entry with literal start/end instants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

impl CalendarEvent {
    /// Create a VEVENT record with the given instants and no attendees
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::Event,
            summary: None,
            start: Some(start),
            end: Some(end),
            attendees: Vec::new(),
        }
    }

    /// Builder-style attendee append
    pub fn with_attendee(mut self, address: &str, status: ResponseStatus) -> Self {
        self.attendees.push(Attendee::new(address, status));
        self
    }
}
