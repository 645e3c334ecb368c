//! Response types for the standby engine API.
//!
//! This module defines the error response structures and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an error body with a 400 status.
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
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::MalformedInterval { .. } => Self::bad_request(ApiError::with_details(
                "MALFORMED_INTERVAL",
                message,
                "Intervals must be HH:MM-HH:MM within one day, start before end",
            )),
            EngineError::MissingPeriodData { .. } => Self::bad_request(ApiError::with_details(
                "MISSING_PERIOD_DATA",
                message,
                "Every worked date must be part of the duty period",
            )),
            EngineError::InvalidDutyDay { .. } => {
                Self::bad_request(ApiError::new("INVALID_DUTY_DAY", message))
            }
            EngineError::InvalidDate { .. } => Self::bad_request(ApiError::with_details(
                "INVALID_DATE",
                message,
                "Dates must be YYYY-MM-DD or DD.MM.YYYY",
            )),
            EngineError::DuplicateDate { .. } => Self::bad_request(ApiError::with_details(
                "DUPLICATE_DATE",
                message,
                "Each date may appear once, in either date format",
            )),
            EngineError::InvalidRate { .. } => {
                Self::bad_request(ApiError::validation_error(message))
            }
            EngineError::RateNotFound { .. } => Self::bad_request(ApiError::with_details(
                "RATE_NOT_FOUND",
                message,
                "Supply rates in the request or configure a table effective for the period",
            )),
            EngineError::NegativeBucket { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "NEGATIVE_BUCKET",
                    message,
                    "Worked intervals on the same date overlap",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
