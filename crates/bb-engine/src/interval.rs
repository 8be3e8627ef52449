//! The interval model
//!
//! Normalizes both calendar event representations into half-open UTC
//! intervals so the rest of the engine does plain interval arithmetic,
//! and defines the one overlap comparison everything else relies on.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use bb_calendar::{EventWhen, RawEvent};

use crate::error::{EngineError, Result};

/// A half-open interval `[start, end)` on the UTC timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create an interval. Degenerate or inverted intervals are rejected
    /// as malformed.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(EngineError::MalformedEvent(format!(
                "interval start {} is not before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Strict half-open overlap: `a.start < b.end && a.end > b.start`.
    /// Intervals that merely touch at an endpoint do not overlap, which
    /// is what permits back-to-back bookings with zero gap. Load-bearing;
    /// do not weaken either inequality.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Place a local wall-clock time on the UTC timeline. An ambiguous local
/// time (clock rolled back) maps to the earlier instant; a nonexistent
/// one (clock jumped forward) is a malformed temporal value.
pub(crate) fn local_to_utc(local: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>> {
    local
        .and_local_timezone(zone)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            EngineError::MalformedEvent(format!("{} does not exist in {}", local, zone))
        })
}

/// Normalize a raw calendar event into a UTC interval.
///
/// Timed events convert directly. All-day events run from local midnight
/// of the start date to local midnight of the exclusive end date, so a
/// single all-day event blocks exactly that local calendar day — not the
/// UTC day, and not the end date.
pub fn normalize(event: &RawEvent, zone: Tz) -> Result<TimeInterval> {
    match event.when {
        EventWhen::Timed { start, end } => TimeInterval::new(start, end),
        EventWhen::AllDay { start, end } => {
            let start_naive = start.and_hms_opt(0, 0, 0).ok_or_else(|| {
                EngineError::MalformedEvent(format!("no midnight on {}", start))
            })?;
            let end_naive = end.and_hms_opt(0, 0, 0).ok_or_else(|| {
                EngineError::MalformedEvent(format!("no midnight on {}", end))
            })?;
            TimeInterval::new(local_to_utc(start_naive, zone)?, local_to_utc(end_naive, zone)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn interval(start: &str, end: &str) -> TimeInterval {
        TimeInterval::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_degenerate_interval_rejected() {
        let at: DateTime<Utc> = "2025-10-21T14:00:00Z".parse().unwrap();
        assert!(TimeInterval::new(at, at).is_err());
        assert!(TimeInterval::new(at, at - chrono::Duration::hours(1)).is_err());
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = interval("2025-10-21T14:00:00Z", "2025-10-21T15:00:00Z");
        let b = interval("2025-10-21T14:30:00Z", "2025-10-21T15:30:00Z");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = interval("2025-10-21T16:00:00Z", "2025-10-21T17:00:00Z");
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_interval_overlaps_itself() {
        let a = interval("2025-10-21T14:00:00Z", "2025-10-21T15:00:00Z");
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let a = interval("2025-10-21T14:00:00Z", "2025-10-21T15:00:00Z");
        let b = interval("2025-10-21T15:00:00Z", "2025-10-21T16:00:00Z");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = interval("2025-10-21T10:00:00Z", "2025-10-21T18:00:00Z");
        let inner = interval("2025-10-21T14:00:00Z", "2025-10-21T14:30:00Z");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_normalize_timed_event() {
        let event = RawEvent::timed(
            "Corte - Ana",
            "2025-10-21T19:00:00Z".parse().unwrap(),
            "2025-10-21T20:00:00Z".parse().unwrap(),
        );
        let interval = normalize(&event, Tz::America__Guayaquil).unwrap();
        assert_eq!(interval.start(), "2025-10-21T19:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_normalize_rejects_inverted_timed_event() {
        let event = RawEvent::timed(
            "odd",
            "2025-10-21T20:00:00Z".parse().unwrap(),
            "2025-10-21T19:00:00Z".parse().unwrap(),
        );
        assert!(normalize(&event, Tz::UTC).is_err());
    }

    #[test]
    fn test_normalize_all_day_blocks_the_local_day() {
        // Guayaquil is UTC-5: local midnight is 05:00Z.
        let date = NaiveDate::from_ymd_opt(2025, 10, 21).unwrap();
        let event = RawEvent::single_day("Vacaciones", date);
        let interval = normalize(&event, Tz::America__Guayaquil).unwrap();

        assert_eq!(interval.start(), "2025-10-21T05:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert_eq!(interval.end(), "2025-10-22T05:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_normalize_multi_day_all_day_event() {
        let event = RawEvent::all_day(
            "Vacaciones",
            NaiveDate::from_ymd_opt(2025, 10, 21).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 24).unwrap(),
        );
        let interval = normalize(&event, Tz::America__Guayaquil).unwrap();
        assert_eq!(interval.end() - interval.start(), chrono::Duration::days(3));
    }
}
