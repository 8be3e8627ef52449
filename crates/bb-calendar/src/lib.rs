//! bb-calendar: calendar provider integration for bb-gateway
//!
//! This crate is the boundary to the external calendar that owns all
//! appointment data. It provides:
//!
//! - The [`CalendarProvider`] trait the availability engine consumes
//! - A Google Calendar v3 REST client
//! - An in-memory provider for tests
//!
//! Heterogeneous wire events (timed vs all-day) are resolved into the
//! [`EventWhen`] tagged union exactly once, here at the boundary; nothing
//! downstream branches on wire key shapes.

pub mod error;
pub mod google;
pub mod memory;
pub mod models;
pub mod provider;

pub use error::{CalendarError, Result};
pub use google::GoogleCalendarClient;
pub use memory::InMemoryCalendar;
pub use models::{EventPayload, EventWhen, RawEvent};
pub use provider::CalendarProvider;
