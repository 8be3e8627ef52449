//! The calendar collaborator interface consumed by the availability engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{EventPayload, RawEvent};

/// A calendar backend holding the appointment data. The provider's event
/// store is the system of record; nothing is persisted on this side.
///
/// `list_events` may return events in any order and may include events
/// only partially overlapping the window. Failures surface verbatim as
/// [`crate::CalendarError`]; no retry or backoff happens here.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// List raw events intersecting the given UTC window.
    async fn list_events(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<RawEvent>>;

    /// Insert a new event. There is no atomicity between a prior
    /// `list_events` read and this write; callers own that limitation.
    async fn insert_event(&self, calendar_id: &str, payload: EventPayload) -> Result<()>;
}
