//! HTTP boundary errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Paths served by the API, reported on 404
pub const VALID_ROUTES: [&str; 3] = ["/", "/health", "/predict"];

/// Errors returned to HTTP callers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body is missing, not JSON, or lacks a string `message`
    #[error("Please send JSON like {{'message': 'your text'}}")]
    BadRequest,

    /// `/predict` called with something other than POST
    #[error("Use POST method for /predict")]
    MethodNotAllowed,

    /// `/` or `/health` called with something other than GET
    #[error("Method not allowed, use GET")]
    GetOnly,

    /// No route matched
    #[error("Route not found")]
    NotFound,

    /// Prediction could not be produced
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed | ApiError::GetOnly => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::MethodNotAllowed => json!({
                "error": self.to_string(),
                "example": { "message": "your text here" }
            }),
            ApiError::NotFound => json!({
                "error": self.to_string(),
                "valid_routes": VALID_ROUTES
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (self.status(), Json(body)).into_response()
    }
}
