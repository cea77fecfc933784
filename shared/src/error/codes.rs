//! Unified error codes for the billing workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Document errors (invoices, returns, stock sheets)
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so hosts in other
/// languages can match on them without string parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Document ====================
    /// Document has no (valid) line items
    DocumentEmpty = 4001,
    /// Document is posted and can no longer be edited
    DocumentLocked = 4002,
    /// Row index does not exist in the document
    RowNotFound = 4003,
    /// A submission for this form is still in flight
    SubmitInFlight = 4004,
    /// Date could not be parsed
    InvalidDate = 4005,

    // ==================== 6xxx: Product ====================
    /// Product not found in the catalog
    ProductNotFound = 6001,
    /// Product already used by another row
    DuplicateProduct = 6002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9002,
    /// Input/output error
    IoError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Document
            ErrorCode::DocumentEmpty => "At least one item is required",
            ErrorCode::DocumentLocked => "Posted documents cannot be edited",
            ErrorCode::RowNotFound => "Row not found",
            ErrorCode::SubmitInFlight => "A submission is already in progress",
            ErrorCode::InvalidDate => "Invalid date",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::DuplicateProduct => "You cannot choose the duplicate product",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::IoError => "Input/output error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Document
            4001 => Ok(ErrorCode::DocumentEmpty),
            4002 => Ok(ErrorCode::DocumentLocked),
            4003 => Ok(ErrorCode::RowNotFound),
            4004 => Ok(ErrorCode::SubmitInFlight),
            4005 => Ok(ErrorCode::InvalidDate),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::DuplicateProduct),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::ConfigError),
            9003 => Ok(ErrorCode::IoError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::DocumentEmpty.code(), 4001);
        assert_eq!(ErrorCode::SubmitInFlight.code(), 4004);
        assert_eq!(ErrorCode::DuplicateProduct.code(), 6002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::InvalidFormat,
            ErrorCode::ValueOutOfRange,
            ErrorCode::DocumentEmpty,
            ErrorCode::DocumentLocked,
            ErrorCode::RowNotFound,
            ErrorCode::SubmitInFlight,
            ErrorCode::InvalidDate,
            ErrorCode::ProductNotFound,
            ErrorCode::DuplicateProduct,
            ErrorCode::InternalError,
            ErrorCode::ConfigError,
            ErrorCode::IoError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(ErrorCode::try_from(5), Err(InvalidErrorCode(5)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::DuplicateProduct).unwrap();
        assert_eq!(json, "6002");
        let code: ErrorCode = serde_json::from_str("4002").unwrap();
        assert_eq!(code, ErrorCode::DocumentLocked);
    }
}
