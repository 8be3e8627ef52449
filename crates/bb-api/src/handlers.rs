//! HTTP API handlers
//!
//! Request handlers for the booking wizard: catalog, slots, booking.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bb_core::{Service, Venue};
use bb_engine::{BookingRequest, Customer};

use crate::error::{ApiError, Result};
use crate::server::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Query for the slot listing
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// Barber id from the catalog
    pub barber: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Slot listing response
#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub barber: String,
    pub date: NaiveDate,
    /// Open slot starts as "HH:MM", ascending
    pub slots: Vec<String>,
}

/// Booking request payload
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    pub barber: String,
    pub date: NaiveDate,
    /// Requested start as "HH:MM"
    pub time: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Service id from the catalog
    pub service: String,
    /// Optional appointment length override
    pub duration_minutes: Option<u32>,
}

/// Booking confirmation payload
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub barber: String,
    pub venue: String,
    pub service: String,
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Venue catalog
pub async fn venues(State(state): State<AppState>) -> Json<Vec<Venue>> {
    Json(state.catalog.venues.clone())
}

/// Service catalog
pub async fn services(State(state): State<AppState>) -> Json<Vec<Service>> {
    Json(state.catalog.services.clone())
}

/// Open slots for a barber and date
pub async fn slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>> {
    let (_, barber) = state
        .catalog
        .barber(&query.barber)
        .ok_or_else(|| ApiError::UnknownBarber(query.barber.clone()))?;

    debug!("Listing slots for {} on {}", barber.name, query.date);

    let open = bb_engine::list_slots(
        state.calendar.as_ref(),
        &state.hours,
        state.zone,
        &barber.calendar_id,
        query.date,
    )
    .await?;

    Ok(Json(SlotsResponse {
        barber: query.barber,
        date: query.date,
        slots: open.iter().map(|t| t.format("%H:%M").to_string()).collect(),
    }))
}

/// Commit a booking
pub async fn book(
    State(state): State<AppState>,
    Json(req): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>)> {
    let (venue, barber) = state
        .catalog
        .barber(&req.barber)
        .ok_or_else(|| ApiError::UnknownBarber(req.barber.clone()))?;
    let service = state
        .catalog
        .service(&req.service)
        .ok_or_else(|| ApiError::UnknownService(req.service.clone()))?;

    let start = NaiveTime::parse_from_str(&req.time, "%H:%M")
        .map_err(|_| ApiError::InvalidRequest(format!("invalid time: {}", req.time)))?;

    let request = BookingRequest {
        calendar_id: barber.calendar_id.clone(),
        date: req.date,
        start,
        duration_minutes: req.duration_minutes,
        customer: Customer {
            name: req.name.clone(),
            phone: req.phone.clone(),
            email: req.email.clone(),
        },
        service: service.name.clone(),
    };

    let confirmation = bb_engine::book(
        state.calendar.as_ref(),
        &state.hours,
        state.zone,
        &request,
    )
    .await?;

    // Fire-and-forget booking log; a failure here never affects the
    // already-committed booking.
    let log = state.log.clone();
    let row = vec![
        Utc::now().to_rfc3339(),
        venue.name.clone(),
        barber.name.clone(),
        confirmation.service.clone(),
        confirmation.date.to_string(),
        confirmation.start.format("%H:%M").to_string(),
        req.name.clone(),
        req.phone.clone(),
        req.email.clone(),
    ];
    tokio::spawn(async move {
        if let Err(e) = log.append_row(row).await {
            warn!("Booking log append failed: {}", e);
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            barber: req.barber,
            venue: venue.name.clone(),
            service: confirmation.service,
            date: confirmation.date,
            start: confirmation.start.format("%H:%M").to_string(),
            end: confirmation.end.format("%H:%M").to_string(),
        }),
    ))
}
