//! bb-sheets: spreadsheet booking log for bb-gateway
//!
//! Appends one row per committed booking to a spreadsheet. Pure
//! side-effect collaborator: it is called after the calendar commit and
//! its failure never rolls back or blocks a booking.

pub mod client;
pub mod error;

pub use client::{BookingLog, NullLog, SheetsClient};
pub use error::{Result, SheetsError};
