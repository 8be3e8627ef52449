//! Error types for bb-core

use thiserror::Error;

/// Main error type for bb-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid business hours: {0}")]
    InvalidHours(String),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for bb-core
pub type Result<T> = std::result::Result<T, Error>;
