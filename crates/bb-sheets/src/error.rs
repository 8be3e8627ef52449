//! Error types for bb-sheets

use thiserror::Error;

/// bb-sheets error type
#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Sheets API returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SheetsError>;
