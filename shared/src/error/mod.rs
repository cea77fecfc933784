//! Unified error system for the billing workspace
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Response envelope used by hosts
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Document errors
//! - 6xxx: Product errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::DocumentLocked);
//! let err = AppError::validation("Quantity is required").with_detail("row", 2);
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
