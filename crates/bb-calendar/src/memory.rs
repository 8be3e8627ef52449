//! In-memory calendar provider
//!
//! Backs tests and local development without network access. Mirrors the
//! real provider's semantics where they matter: coarse window filtering,
//! exclusive all-day end dates, and crucially no coordination between a
//! `list_events` read and a subsequent `insert_event` write, which makes
//! this the vehicle for exercising the documented check-then-act race.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CalendarError, Result};
use crate::models::{EventPayload, EventWhen, RawEvent};
use crate::provider::CalendarProvider;

/// A calendar provider holding events in process memory.
pub struct InMemoryCalendar {
    zone: Tz,
    events: RwLock<HashMap<String, Vec<RawEvent>>>,
}

impl InMemoryCalendar {
    /// Create an empty store. `zone` is used to place inserted local
    /// wall-clock payloads on the UTC timeline.
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Add an event directly, bypassing the payload path.
    pub async fn seed(&self, calendar_id: &str, event: RawEvent) {
        let mut events = self.events.write().await;
        events.entry(calendar_id.to_string()).or_default().push(event);
    }

    /// Number of events stored for a calendar.
    pub async fn len(&self, calendar_id: &str) -> usize {
        let events = self.events.read().await;
        events.get(calendar_id).map_or(0, |v| v.len())
    }

    fn intersects_window(&self, event: &RawEvent, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        match &event.when {
            EventWhen::Timed { start, end } => *start < to && *end > from,
            EventWhen::AllDay { start, end } => {
                let start = local_midnight_utc(*start, self.zone);
                let end = local_midnight_utc(*end, self.zone);
                match (start, end) {
                    (Some(start), Some(end)) => start < to && end > from,
                    // Unmappable midnights stay visible rather than vanish.
                    _ => true,
                }
            }
        }
    }
}

fn local_midnight_utc(date: chrono::NaiveDate, zone: Tz) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)?
        .and_local_timezone(zone)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl CalendarProvider for InMemoryCalendar {
    async fn list_events(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<RawEvent>> {
        let events = self.events.read().await;
        let matching: Vec<RawEvent> = events
            .get(calendar_id)
            .into_iter()
            .flatten()
            .filter(|e| self.intersects_window(e, from, to))
            .cloned()
            .collect();

        debug!(
            "In-memory list: {} of {} events on {} intersect the window",
            matching.len(),
            events.get(calendar_id).map_or(0, |v| v.len()),
            calendar_id
        );
        Ok(matching)
    }

    async fn insert_event(&self, calendar_id: &str, payload: EventPayload) -> Result<()> {
        let start = payload
            .start
            .and_local_timezone(self.zone)
            .earliest()
            .ok_or_else(|| {
                CalendarError::InvalidPayload(format!(
                    "{} does not exist in {}",
                    payload.start, self.zone
                ))
            })?
            .with_timezone(&Utc);
        let end = payload
            .end
            .and_local_timezone(self.zone)
            .earliest()
            .ok_or_else(|| {
                CalendarError::InvalidPayload(format!(
                    "{} does not exist in {}",
                    payload.end, self.zone
                ))
            })?
            .with_timezone(&Utc);

        let event = RawEvent::timed(payload.summary, start, end);
        let mut events = self.events.write().await;
        events.entry(calendar_id.to_string()).or_default().push(event);
        Ok(())
    }
}
