//! bb-engine: the availability engine for bb-gateway
//!
//! Given a barber's calendar, a date and the shop's business hours, this
//! crate computes the bookable slots and validates and commits bookings.
//! It owns no state of its own: every answer is a pure function of the
//! configuration plus a fresh read from the calendar provider.
//!
//! ## Known limitation
//!
//! Booking is check-then-act against a provider with no transaction
//! spanning the read and the insert. Two simultaneous attempts for
//! overlapping slots can both pass validation and both commit. Closing
//! that race needs provider-side idempotency keys or a serializing queue
//! in front of bookings, both outside this engine.

pub mod availability;
pub mod booking;
pub mod error;
pub mod interval;

pub use availability::{is_blackout, list_slots, BLACKOUT_KEYWORDS};
pub use booking::{book, BookingRequest, Confirmation, Customer};
pub use error::{EngineError, Result};
pub use interval::{normalize, TimeInterval};
