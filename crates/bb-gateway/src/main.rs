//! bb-gateway: Barber Booking Gateway Main Binary
//!
//! Main entry point for the barber-shop booking service.
//!
//! Usage:
//!   bb-gateway            - Start the HTTP API server
//!   bb-gateway --help     - Show help
//!   bb-gateway --version  - Show version

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use bb_api::{start_server, AppState};
use bb_calendar::GoogleCalendarClient;
use bb_core::{Catalog, Config};
use bb_sheets::{BookingLog, NullLog, SheetsClient};

/// Run mode
enum RunMode {
    /// Server mode (HTTP API)
    Server,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    match parse_args() {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("bb-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting bb-gateway...");
    tracing::info!(
        "Business hours: {}-{} every {} minutes ({})",
        config.hours.opening,
        config.hours.closing,
        config.hours.slot_minutes,
        config.calendar.time_zone
    );

    // Load the venue/barber/service catalog
    let catalog = match &config.catalog_file {
        Some(path) => Catalog::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load catalog from {}: {}", path, e))?,
        None => Catalog::default(),
    };
    tracing::info!(
        "Catalog loaded: {} venues, {} services",
        catalog.venues.len(),
        catalog.services.len()
    );

    // Calendar provider
    let calendar = GoogleCalendarClient::new(&config.calendar)
        .map_err(|e| anyhow::anyhow!("Failed to create calendar client: {}", e))?;

    // Booking log (optional)
    let log: Arc<dyn BookingLog> = if config.sheets.enabled() {
        tracing::info!("Booking log enabled");
        Arc::new(
            SheetsClient::new(&config.sheets)
                .map_err(|e| anyhow::anyhow!("Failed to create sheets client: {}", e))?,
        )
    } else {
        tracing::info!("No spreadsheet configured, booking log disabled");
        Arc::new(NullLog)
    };

    let state = AppState {
        hours: config.hours.clone(),
        zone: config.calendar.time_zone,
        catalog: Arc::new(catalog),
        calendar: Arc::new(calendar),
        log,
    };

    start_server(config.server.port, state).await
}

fn parse_args() -> RunMode {
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-V" => return RunMode::Version,
            _ => {}
        }
    }
    RunMode::Server
}

fn print_help() {
    println!("bb-gateway - Barber Booking Gateway");
    println!();
    println!("USAGE:");
    println!("    bb-gateway [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show this help");
    println!("    -V, --version    Show version");
    println!();
    println!("ENVIRONMENT:");
    println!("    BB_CALENDAR_TOKEN    Bearer token for the calendar provider");
    println!("    BB_SHEETS_TOKEN      Bearer token for the Sheets API");
    println!("    BB_SHEET_ID          Spreadsheet id for the booking log");
    println!("    BB_TIME_ZONE         Shop time zone (default America/Guayaquil)");
    println!("    BB_PORT              HTTP port (default 8080)");
}
