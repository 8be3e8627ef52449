//! Error types for bb-engine

use chrono::{DateTime, NaiveTime, Utc};
use thiserror::Error;

use bb_calendar::CalendarError;

/// bb-engine error type. `OutOfHours` and `SlotConflict` are expected,
/// user-facing rejections; `Provider` is an infrastructure failure
/// surfaced verbatim.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Requested time {requested} is outside business hours ({opening}-{closing})")]
    OutOfHours {
        requested: NaiveTime,
        opening: NaiveTime,
        closing: NaiveTime,
    },

    #[error("The slot from {start} to {end} is already taken")]
    SlotConflict {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Calendar provider error: {0}")]
    Provider(#[from] CalendarError),
}

/// Result type alias for bb-engine
pub type Result<T> = std::result::Result<T, EngineError>;
