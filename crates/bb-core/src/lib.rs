//! bb-core: shared configuration and reference data for bb-gateway
//!
//! Provides the configuration layer (business hours, provider settings,
//! serving options) and the static venue/barber/service catalog that the
//! rest of the workspace consumes.

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{Barber, Catalog, Service, Venue};
pub use config::{BusinessHours, CalendarSettings, Config, ServerSettings, SheetsSettings};
pub use error::{Error, Result};
