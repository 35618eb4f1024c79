//! Meeting filter: which calendar entries count as attended past meetings
//!
//! An entry qualifies when it is a VEVENT with both instants, starts at or
//! before `now`, and lists the reference user as an attendee who did not
//! decline. The first attendee entry matching the user decides; later
//! duplicates are never consulted.

use crate::event::{CalendarEvent, EventKind, ResponseStatus};
use chrono::{DateTime, Utc};

/// Why an event was excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotAnEvent,
    MissingInstant,
    InFuture,
    NoAttendees,
    Declined,
    NotInvited,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAnEvent => "not an event",
            Self::MissingInstant => "missing start or end",
            Self::InFuture => "starts in the future",
            Self::NoAttendees => "no attendees",
            Self::Declined => "declined",
            Self::NotInvited => "user not an attendee",
        }
    }
}

/// Event filter bound to one reference user and one `now`
#[derive(Debug, Clone)]
pub struct MeetingFilter {
    /// Lowercased reference email
    user: String,
    now: DateTime<Utc>,
}

impl MeetingFilter {
    pub fn new(reference_user: &str, now: DateTime<Utc>) -> Self {
        Self {
            user: reference_user.trim().to_lowercase(),
            now,
        }
    }

    /// Check if the event counts as a meeting the user took part in
    pub fn is_qualifying_meeting(&self, event: &CalendarEvent) -> bool {
        self.check(event).is_ok()
    }

    /// Same as [`is_qualifying_meeting`](Self::is_qualifying_meeting) but
    /// reports the reason for exclusion
    pub fn check(&self, event: &CalendarEvent) -> Result<(), Rejection> {
        if event.kind != EventKind::Event {
            return Err(Rejection::NotAnEvent);
        }

        let start = match (event.start, event.end) {
            (Some(start), Some(_)) => start,
            _ => return Err(Rejection::MissingInstant),
        };

        if start > self.now {
            return Err(Rejection::InFuture);
        }

        if event.attendees.is_empty() {
            return Err(Rejection::NoAttendees);
        }

        for attendee in &event.attendees {
            let address = attendee.address.trim().to_lowercase();

            if !address.contains('@') || address != self.user {
                continue;
            }

            return match attendee.response_status {
                ResponseStatus::Declined => Err(Rejection::Declined),
                _ => Ok(()),
            };
        }

        Err(Rejection::NotInvited)
    }
}

/// Free-function form of the filter
pub fn is_qualifying_meeting(
    event: &CalendarEvent,
    reference_user: &str,
    now: DateTime<Utc>,
) -> bool {
    MeetingFilter::new(reference_user, now).is_qualifying_meeting(event)
}
