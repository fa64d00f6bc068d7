//! Response types for the Teller Shift Engine API.
//!
//! Engine errors are mapped to HTTP statuses by their [`ErrorKind`]. Internal
//! failures are logged in full and reported with a generic body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{EngineError, ErrorKind};
use crate::models::{EntryKind, Shift, ShiftState};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the body returned for every internal failure.
    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "Internal server error")
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(err: EngineError) -> Self {
        match err.kind() {
            ErrorKind::Validation => {
                let error = match &err {
                    EngineError::Validation { field, .. } => {
                        ApiError::with_details("VALIDATION_ERROR", err.to_string(), field.as_str())
                    }
                    _ => ApiError::validation_error(err.to_string()),
                };
                ApiErrorResponse::bad_request(error)
            }
            ErrorKind::NotFound => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(not_found_code(&err), err.to_string()),
            },
            ErrorKind::Conflict => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(conflict_code(&err), err.to_string()),
            },
            ErrorKind::Internal => {
                error!(error = %err, "Internal error");
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::internal(),
                }
            }
        }
    }
}

fn not_found_code(err: &EngineError) -> &'static str {
    match err {
        EngineError::NoActiveShift { .. } => "NO_ACTIVE_SHIFT",
        _ => "SHIFT_NOT_FOUND",
    }
}

fn conflict_code(err: &EngineError) -> &'static str {
    match err {
        EngineError::ShiftAlreadyOpen { .. } => "SHIFT_ALREADY_OPEN",
        EngineError::DuplicateShiftCode { .. } => "DUPLICATE_SHIFT_CODE",
        EngineError::ShiftAlreadyClosed { .. } => "SHIFT_ALREADY_CLOSED",
        _ => "SHIFT_NOT_OPEN",
    }
}

/// Response body for `POST /shifts/close`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseShiftResponse {
    /// Outcome message; mentions the discrepancy when an alert is raised.
    pub message: String,
    /// The closed shift.
    pub shift: Shift,
}

impl From<Shift> for CloseShiftResponse {
    fn from(shift: Shift) -> Self {
        let message = match shift.discrepancy {
            Some(discrepancy) if shift.discrepancy_alert => {
                format!("Shift closed with discrepancy alert: {}", discrepancy)
            }
            _ => "Shift closed successfully".to_string(),
        };
        Self { message, shift }
    }
}

/// Response body for `GET /denominations`: the domain constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConstants {
    /// Recognized bill values, in configured order.
    pub denominations: Vec<u32>,
    /// Transaction kinds.
    pub kinds: Vec<EntryKind>,
    /// Shift states.
    pub states: Vec<ShiftState>,
}
