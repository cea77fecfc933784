//! Error types and response envelope

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the workspace, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (row index, product id, ...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create an invalid format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }

    /// Document has no usable rows
    pub fn document_empty(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DocumentEmpty, msg)
    }

    /// Document is posted and read-only
    pub fn document_locked() -> Self {
        Self::new(ErrorCode::DocumentLocked)
    }

    /// Row index out of range
    pub fn row_not_found(index: usize) -> Self {
        Self::with_message(ErrorCode::RowNotFound, format!("Row {} not found", index))
            .with_detail("row", index)
    }

    /// A numeric input above its allowed maximum
    pub fn value_out_of_range(field: &str, value: f64, max: f64) -> Self {
        Self::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{} exceeds maximum allowed ({}), got {}", field, max, value),
        )
        .with_detail("field", field)
        .with_detail("max", max)
    }

    /// A submission is already running
    pub fn submit_in_flight() -> Self {
        Self::new(ErrorCode::SubmitInFlight)
    }

    /// Unparseable date
    pub fn invalid_date(input: impl Into<String>) -> Self {
        let input = input.into();
        Self::with_message(ErrorCode::InvalidDate, format!("Invalid date: {}", input))
            .with_detail("input", input)
    }

    /// Product id is not in the catalog
    pub fn product_not_found(product_id: i64) -> Self {
        Self::with_message(
            ErrorCode::ProductNotFound,
            format!("Product {} not found", product_id),
        )
        .with_detail("product_id", product_id)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_message(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_format(err.to_string())
    }
}

/// Unified response envelope
///
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
