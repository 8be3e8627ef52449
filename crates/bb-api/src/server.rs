//! HTTP API Server
//!
//! Starts and manages the axum-based HTTP server.

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use bb_calendar::CalendarProvider;
use bb_core::{BusinessHours, Catalog};
use bb_sheets::BookingLog;
use chrono_tz::Tz;

use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub hours: BusinessHours,
    pub zone: Tz,
    pub catalog: Arc<Catalog>,
    pub calendar: Arc<dyn CalendarProvider>,
    pub log: Arc<dyn BookingLog>,
}

/// Start the HTTP API server
pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app: Router = routes().layer(CorsLayer::permissive()).with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
