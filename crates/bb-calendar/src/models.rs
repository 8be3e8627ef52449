//! Data models for calendar integration

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Popup reminder offsets, in minutes before the appointment start.
pub const REMINDER_MINUTES: [u32; 2] = [30, 10];

/// When an event takes place. Resolved once at the provider boundary from
/// the two wire representations; downstream code matches on this union
/// and never on wire key shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventWhen {
    /// Explicit start/end instants. Instants arriving without a zone
    /// offset are read as UTC at parse time.
    Timed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Date-only range. `end` is exclusive: the end date itself is not
    /// part of the event. This is the provider's wire contract and must
    /// survive into interval arithmetic or slot-blocking is off by a day.
    AllDay { start: NaiveDate, end: NaiveDate },
}

/// A calendar event as returned by a provider query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Free-text label; also the input to blackout-keyword matching.
    pub summary: String,
    /// When the event takes place.
    pub when: EventWhen,
}

impl RawEvent {
    /// Create a timed event.
    pub fn timed(summary: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            summary: summary.into(),
            when: EventWhen::Timed { start, end },
        }
    }

    /// Create an all-day event with an exclusive end date.
    pub fn all_day(summary: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            summary: summary.into(),
            when: EventWhen::AllDay { start, end },
        }
    }

    /// Create an all-day event covering a single calendar day.
    pub fn single_day(summary: impl Into<String>, date: NaiveDate) -> Self {
        Self::all_day(summary, date, date.succ_opt().unwrap_or(date))
    }
}

/// Parse a provider instant. Accepts RFC 3339 with an offset; an instant
/// with no offset at all is read as UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// An event to insert, expressed in the shop's local zone with an
/// explicit zone tag. No attendee list: the service-account calendar
/// identity has no delegated-invite capability, and attaching attendees
/// makes the provider reject the insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub summary: String,
    pub description: String,
    /// Local wall-clock start.
    pub start: NaiveDateTime,
    /// Local wall-clock end.
    pub end: NaiveDateTime,
    /// Zone the wall-clock times are expressed in.
    pub time_zone: Tz,
}
