//! Request handlers

use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

use super::error::ApiError;
use super::server::AppState;

/// Body returned on redacted inference failures
const REDACTED_ERROR: &str = "Prediction failed";

/// Prediction request
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub message: String,
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub confidence: f64,
    /// Original, un-normalized message
    pub message: String,
}

/// Capability listing
pub async fn home() -> impl IntoResponse {
    Json(json!({
        "message": "Spam Detector API is running",
        "routes": {
            "/": "Home",
            "/health": "Check API status",
            "/predict": "POST request with JSON: {'message': 'text here'}"
        }
    }))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "running",
        "server": "Spam Detector API"
    }))
}

/// Classify a message
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let request: PredictRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!("Rejected predict body: {}", e);
        ApiError::BadRequest
    })?;

    let detector = state
        .detector
        .as_ref()
        .ok_or_else(|| state.internal_error("Model and vectorizer are not loaded"))?;

    let prediction = detector
        .classify(&request.message)
        .map_err(|e| state.internal_error(e))?;

    Ok(Json(PredictResponse {
        prediction: prediction.label,
        confidence: prediction.confidence,
        message: request.message,
    }))
}

/// Any non-POST request on `/predict`
pub async fn predict_wrong_method() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Any non-GET request on `/` or `/health`
pub async fn get_only() -> ApiError {
    ApiError::GetOnly
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

impl AppState {
    /// Log an inference failure and build the 500 returned to the caller
    fn internal_error(&self, err: impl std::fmt::Display) -> ApiError {
        error!("Prediction failed: {}", err);

        if self.expose_errors {
            ApiError::Internal(err.to_string())
        } else {
            ApiError::Internal(REDACTED_ERROR.to_string())
        }
    }
}
