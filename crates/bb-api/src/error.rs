//! Error types for bb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use bb_engine::EngineError;

/// bb-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unknown barber: {0}")]
    UnknownBarber(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Body every rejection is rendered with.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// Map to an HTTP status. Validation rejections are client-side
    /// outcomes; only provider trouble is a gateway-side failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownBarber(_) | ApiError::UnknownService(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(EngineError::OutOfHours { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Engine(EngineError::SlotConflict { .. }) => StatusCode::CONFLICT,
            ApiError::Engine(EngineError::Provider(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Engine(EngineError::MalformedEvent(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
