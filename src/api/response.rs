//! Response types for the payslip engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

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

/// Body of a successful request that returns no resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// What happened.
    pub message: String,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
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
            EngineError::EmployeeNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, ApiError::new("EMPLOYEE_NOT_FOUND", message))
            }
            EngineError::NoAttendanceData { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "NO_ATTENDANCE_DATA",
                    message,
                    "Payroll needs at least one working or leave day in the month",
                ),
            ),
            EngineError::PayrollNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "PAYROLL_NOT_FOUND",
                    message,
                    "Calculate the payroll for this month first",
                ),
            ),
            EngineError::DuplicatePayroll { .. } => {
                Self::new(StatusCode::CONFLICT, ApiError::new("DUPLICATE_PAYROLL", message))
            }
            EngineError::InvalidMonthFormat { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_MONTH_FORMAT", message),
            ),
            EngineError::InvalidAllowances { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_ALLOWANCES", message),
            ),
            EngineError::SalaryOverflow { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "SALARY_OVERFLOW",
                    message,
                    "Allowances or base salary are outside the supported range",
                ),
            ),
            EngineError::InvalidEmployee { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee directory holds invalid data for this employee",
                ),
            ),
            EngineError::RenderFailure { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("RENDER_FAILURE", "Failed to render payslip", message),
            ),
            EngineError::DeliveryFailed { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("DELIVERY_FAILED", "Failed to send email", message),
            ),
            EngineError::StorageFailure { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_FAILURE", "Storage failure", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
        }
    }
}
