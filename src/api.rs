// 🌐 HTTP API - Axum routes for receipt processing
//
//   POST /receipts/process     RawReceipt JSON → {"id": "..."}
//   GET  /receipts/:id/points  → {"points": N}

use crate::error::ReceiptError;
use crate::receipt::RawReceipt;
use crate::service::ReceiptProcessor;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub processor: Arc<ReceiptProcessor>,
}

impl AppState {
    pub fn new(processor: ReceiptProcessor) -> Self {
        AppState {
            processor: Arc::new(processor),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Error rendered at the HTTP boundary
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a RawReceipt
    InvalidJson(JsonRejection),
    Receipt(ReceiptError),
}

impl From<ReceiptError> for ApiError {
    fn from(e: ReceiptError) -> Self {
        ApiError::Receipt(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::InvalidJson(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InvalidJson(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Unable to deserialize receipt");
                (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    "Unable to deserialize JSON payload.".to_string(),
                )
            }
            ApiError::Receipt(ReceiptError::DuplicateSubmission) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "Duplicate Request.".to_string(),
            ),
            ApiError::Receipt(e @ ReceiptError::MalformedInput { .. }) => {
                tracing::error!(error = %e, "Failed to process receipt");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    format!("Failed to process receipt: {}", e),
                )
            }
            ApiError::Receipt(ReceiptError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                "PAGE_NOT_FOUND",
                "Unrecognized receipt id.".to_string(),
            ),
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /receipts/process - Score and store a receipt
async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<RawReceipt>, JsonRejection>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let Json(raw) = payload?;
    let id = state.processor.process(&raw)?;
    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/:id/points - Points for a stored receipt
async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    let points = state.processor.points(&id)?;
    Ok(Json(PointsResponse { points }))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================
