//! Booking validation and commit
//!
//! One booking attempt is a single synchronous round-trip:
//! `Requested -> Validated -> Committed`, or rejected with a reason. No
//! intermediate state is persisted anywhere; the provider's calendar is
//! the system of record.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use bb_calendar::{CalendarProvider, EventPayload};
use bb_core::BusinessHours;

use crate::error::{EngineError, Result};
use crate::interval::{local_to_utc, normalize, TimeInterval};

/// Customer identity attached to a booking. Opaque strings; the UI layer
/// owns whatever validation beyond non-empty it wants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// A booking request as handed over by the UI at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Provider-side calendar key of the barber.
    pub calendar_id: String,
    pub date: NaiveDate,
    /// Requested local start time.
    pub start: NaiveTime,
    /// Appointment length; falls back to the configured default.
    pub duration_minutes: Option<u32>,
    pub customer: Customer,
    /// Display label of the booked service.
    pub service: String,
}

/// A committed booking.
#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub calendar_id: String,
    pub service: String,
    pub customer_name: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub starts_at_utc: DateTime<Utc>,
}

/// Validate a booking and commit it to the provider calendar.
///
/// The busy read happens here, immediately before the insert — never
/// reused from the slot list the user was shown, since that list may be
/// stale by the time they confirm. There is still no atomicity between
/// this read and the provider's insert; see the crate docs.
pub async fn book(
    provider: &dyn CalendarProvider,
    hours: &BusinessHours,
    zone: Tz,
    request: &BookingRequest,
) -> Result<Confirmation> {
    if !hours.allows_start(request.start) {
        return Err(EngineError::OutOfHours {
            requested: request.start,
            opening: hours.opening,
            closing: hours.closing,
        });
    }

    let duration = Duration::minutes(
        request
            .duration_minutes
            .unwrap_or(hours.default_duration_minutes) as i64,
    );
    let start_local = request.date.and_time(request.start);
    let end_local = start_local + duration;

    let candidate = TimeInterval::new(
        local_to_utc(start_local, zone)?,
        local_to_utc(end_local, zone)?,
    )?;

    let existing = provider
        .list_events(&request.calendar_id, candidate.start(), candidate.end())
        .await?;

    for event in &existing {
        let busy = match normalize(event, zone) {
            Ok(interval) => interval,
            Err(e) => {
                warn!("Skipping malformed event '{}': {}", event.summary, e);
                continue;
            }
        };
        if candidate.overlaps(&busy) {
            return Err(EngineError::SlotConflict {
                start: candidate.start(),
                end: candidate.end(),
            });
        }
    }

    let payload = EventPayload {
        summary: format!("{} - {}", request.service, request.customer.name),
        description: format!(
            "Cliente: {}\nTeléfono: {}\nCorreo: {}\nServicio: {}",
            request.customer.name, request.customer.phone, request.customer.email, request.service
        ),
        start: start_local,
        end: end_local,
        time_zone: zone,
    };

    provider.insert_event(&request.calendar_id, payload).await?;

    info!(
        "Booked '{}' for {} on {} at {} ({})",
        request.service, request.customer.name, request.date, request.start, request.calendar_id
    );

    Ok(Confirmation {
        calendar_id: request.calendar_id.clone(),
        service: request.service.clone(),
        customer_name: request.customer.name.clone(),
        date: request.date,
        start: request.start,
        end: end_local.time(),
        starts_at_utc: candidate.start(),
    })
}
