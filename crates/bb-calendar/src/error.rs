//! Error types for bb-calendar

use thiserror::Error;

/// bb-calendar error type
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Response decoding error: {0}")]
    Decode(String),

    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CalendarError>;
