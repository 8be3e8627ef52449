//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{book, health, services, slots, venues};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Catalog
        .route("/api/venues", get(venues))
        .route("/api/services", get(services))
        // Availability
        .route("/api/slots", get(slots))
        // Booking
        .route("/api/book", post(book))
}
