//! Slot listing
//!
//! Computes the bookable slot starts for one barber calendar on one date.

use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use tracing::{debug, warn};

use bb_calendar::{CalendarProvider, RawEvent};
use bb_core::BusinessHours;

use crate::error::Result;
use crate::interval::{local_to_utc, normalize, TimeInterval};

/// Summary keywords that black out the whole day. An event carrying one
/// of these is a signal label, not a time range: its own start/end are
/// ignored and no slot on that day is offered.
pub const BLACKOUT_KEYWORDS: [&str; 4] =
    ["no disponible", "vacaciones", "fuera de oficina", "permiso"];

/// Case-insensitive substring match against the blackout keyword set.
pub fn is_blackout(summary: &str) -> bool {
    let summary = summary.to_lowercase();
    BLACKOUT_KEYWORDS.iter().any(|k| summary.contains(k))
}

/// List the open slot starts for `calendar_id` on `date`, ascending.
///
/// The provider is queried once for the local business-hours window of
/// the date. If any event summary matches a blackout keyword the whole
/// day is empty, before any interval filtering. A malformed event is
/// skipped with a warning rather than failing the query; one bad record
/// must not black out a day by accident.
pub async fn list_slots(
    provider: &dyn CalendarProvider,
    hours: &BusinessHours,
    zone: Tz,
    calendar_id: &str,
    date: NaiveDate,
) -> Result<Vec<NaiveTime>> {
    // The last candidate starts at closing and runs one granularity past
    // it, so the query window is widened to catch events overlapping it.
    let step = Duration::minutes(hours.slot_minutes as i64);
    let window_from = local_to_utc(date.and_time(hours.opening), zone)?;
    let window_to = local_to_utc(date.and_time(hours.closing) + step, zone)?;

    let events = provider.list_events(calendar_id, window_from, window_to).await?;

    // Blackout short-circuits everything else.
    if let Some(event) = events.iter().find(|e| is_blackout(&e.summary)) {
        debug!(
            "Calendar {} is blacked out on {} by '{}'",
            calendar_id, date, event.summary
        );
        return Ok(Vec::new());
    }

    let busy = normalize_events(&events, zone);

    let mut open = Vec::new();
    for start in hours.slot_starts() {
        let slot_start = local_to_utc(date.and_time(start), zone)?;
        let slot = TimeInterval::new(slot_start, slot_start + step)?;
        if !busy.iter().any(|b| slot.overlaps(b)) {
            open.push(start);
        }
    }

    debug!(
        "{} of {} slots open on {} for {}",
        open.len(),
        hours.slot_starts().len(),
        date,
        calendar_id
    );
    Ok(open)
}

fn normalize_events(events: &[RawEvent], zone: Tz) -> Vec<TimeInterval> {
    events
        .iter()
        .filter_map(|event| match normalize(event, zone) {
            Ok(interval) => Some(interval),
            Err(e) => {
                warn!("Skipping malformed event '{}': {}", event.summary, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_calendar::InMemoryCalendar;
    use chrono::{DateTime, Utc};

    const CAL: &str = "israel@wabisabibarber.example";
    const ZONE: Tz = Tz::America__Guayaquil;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 21).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// Local Guayaquil wall clock on the test date, as a UTC instant.
    fn local(h: u32, m: u32) -> DateTime<Utc> {
        local_to_utc(date().and_time(t(h, m)), ZONE).unwrap()
    }

    #[tokio::test]
    async fn test_empty_calendar_yields_every_candidate() {
        let store = InMemoryCalendar::new(ZONE);
        let hours = BusinessHours::default();

        let slots = list_slots(&store, &hours, ZONE, CAL, date()).await.unwrap();

        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0], hours.opening);
        assert_eq!(*slots.last().unwrap(), hours.closing);
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_busy_hour_hides_its_two_slots() {
        let store = InMemoryCalendar::new(ZONE);
        store
            .seed(CAL, RawEvent::timed("Corte - Ana", local(14, 0), local(15, 0)))
            .await;
        let hours = BusinessHours::default();

        let slots = list_slots(&store, &hours, ZONE, CAL, date()).await.unwrap();

        assert!(slots.contains(&t(13, 30)));
        assert!(!slots.contains(&t(14, 0)));
        assert!(!slots.contains(&t(14, 30)));
        assert!(slots.contains(&t(15, 0)));
    }

    #[tokio::test]
    async fn test_blackout_keyword_empties_the_day() {
        let store = InMemoryCalendar::new(ZONE);
        // A short timed event; its own span is irrelevant.
        store
            .seed(CAL, RawEvent::timed("Vacaciones", local(12, 0), local(12, 30)))
            .await;

        let slots = list_slots(&store, &BusinessHours::default(), ZONE, CAL, date())
            .await
            .unwrap();
        assert!(slots.is_empty());
    }

    #[tokio::test]
    async fn test_blackout_matches_case_insensitive_substring() {
        assert!(is_blackout("VACACIONES"));
        assert!(is_blackout("Fuera de Oficina - todo el día"));
        assert!(is_blackout("permiso médico"));
        assert!(!is_blackout("Corte - Vicente"));
    }

    #[tokio::test]
    async fn test_all_day_event_blocks_the_day_but_not_the_next() {
        let store = InMemoryCalendar::new(ZONE);
        // Not a blackout label; blocks by time span alone.
        store.seed(CAL, RawEvent::single_day("Feriado local", date())).await;
        let hours = BusinessHours::default();

        let today = list_slots(&store, &hours, ZONE, CAL, date()).await.unwrap();
        assert!(today.is_empty());

        let tomorrow = list_slots(&store, &hours, ZONE, CAL, date().succ_opt().unwrap())
            .await
            .unwrap();
        assert_eq!(tomorrow.len(), 20);
    }

    #[tokio::test]
    async fn test_malformed_event_is_skipped_not_fatal() {
        let store = InMemoryCalendar::new(ZONE);
        // Inverted interval: normalization fails, the event is skipped.
        store
            .seed(CAL, RawEvent::timed("Corte - Ana", local(15, 0), local(14, 0)))
            .await;

        let slots = list_slots(&store, &BusinessHours::default(), ZONE, CAL, date())
            .await
            .unwrap();
        assert_eq!(slots.len(), 20);
    }

    #[tokio::test]
    async fn test_event_touching_a_slot_does_not_hide_it() {
        let store = InMemoryCalendar::new(ZONE);
        store
            .seed(CAL, RawEvent::timed("Corte - Ana", local(13, 30), local(14, 0)))
            .await;

        let slots = list_slots(&store, &BusinessHours::default(), ZONE, CAL, date())
            .await
            .unwrap();
        // 14:00 starts exactly where the event ends: back-to-back is fine.
        assert!(slots.contains(&t(14, 0)));
        assert!(!slots.contains(&t(13, 30)));
    }
}
