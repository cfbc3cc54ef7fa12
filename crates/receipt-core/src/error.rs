//! # Error Types
//!
//! Domain-specific error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                       │
//! │  ├── ValidationError  - Submission rejected by the validator           │
//! │  └── ReceiptError     - Everything a use case can return               │
//! │                                                                         │
//! │  receipt-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (in receipt-api)                                          │
//! │  └── ApiError         - What the caller sees (status + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → ReceiptError → ApiError → Caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Message Catalogue
//! The `Display` text of every variant is part of the public contract and
//! must not change:
//!
//! | Variant                | Message                                                   |
//! |------------------------|-----------------------------------------------------------|
//! | `MissingField(f)`      | `Mandatory value {f} not found.`                          |
//! | `InvalidDate`          | `Date format is incorrect. Please use YYYY-MM-DD format.` |
//! | `InvalidTime`          | `Time format is incorrect. Please use HH:MM format.`      |
//! | `InvalidFieldValue(f)` | `{f} value is incorrect.`                                 |
//! | `InvalidUrl(f)`        | `{f} in url is invalid`                                   |
//! | `NotFound(id)`         | `No points found for id {id}`                             |
//! | `DuplicateReceipt`     | `Receipt is already used.`                                |
//! | `Internal`             | `Internal server error!`                                  |

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Submission validation failures.
///
/// Produced by [`crate::validation::validate_receipt`]. Only the first failure
/// is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A mandatory value is absent (or empty where emptiness is meaningless).
    #[error("Mandatory value {0} not found.")]
    MissingField(String),

    /// `purchaseDate` is not a `YYYY-MM-DD` calendar date.
    #[error("Date format is incorrect. Please use YYYY-MM-DD format.")]
    InvalidDate,

    /// `purchaseTime` is not a 24-hour `HH:MM` time.
    #[error("Time format is incorrect. Please use HH:MM format.")]
    InvalidTime,

    /// A value is present but wrong (e.g. total does not match the items).
    #[error("{0} value is incorrect.")]
    InvalidFieldValue(String),
}

impl ValidationError {
    /// Creates a MissingField error.
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingField(field.into())
    }

    /// Creates an InvalidFieldValue error.
    pub fn invalid_value(field: impl Into<String>) -> Self {
        ValidationError::InvalidFieldValue(field.into())
    }
}

// =============================================================================
// Receipt Error
// =============================================================================

/// Outcome of a failed submission or lookup.
///
/// ## Client vs Server Errors
/// Every variant except `Internal` is an expected, deterministic outcome and
/// is shown to the caller verbatim. `Internal` never exposes its detail.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The submission failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A receipt with the same retailer, date and time is already stored.
    #[error("Receipt is already used.")]
    DuplicateReceipt,

    /// No receipt exists with this identifier.
    #[error("No points found for id {0}")]
    NotFound(String),

    /// A positional URL parameter is missing or blank.
    #[error("{0} in url is invalid")]
    InvalidUrl(String),

    /// Storage outage, timeout or a defect.
    ///
    /// `detail` is for logs only.
    #[error("Internal server error!")]
    Internal { detail: String },
}

impl ReceiptError {
    /// Creates an Internal error from anything printable.
    pub fn internal(detail: impl Into<String>) -> Self {
        ReceiptError::Internal {
            detail: detail.into(),
        }
    }

    /// Whether the caller caused this error (client-error class).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ReceiptError::Internal { .. })
    }
}

/// Convenience type alias for Results with ReceiptError.
pub type ReceiptResult<T> = Result<T, ReceiptError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::missing("retailer").to_string(),
            "Mandatory value retailer not found."
        );
        assert_eq!(
            ValidationError::InvalidDate.to_string(),
            "Date format is incorrect. Please use YYYY-MM-DD format."
        );
        assert_eq!(
            ValidationError::InvalidTime.to_string(),
            "Time format is incorrect. Please use HH:MM format."
        );
        assert_eq!(
            ValidationError::invalid_value("total").to_string(),
            "total value is incorrect."
        );
    }

    #[test]
    fn test_receipt_error_messages() {
        assert_eq!(
            ReceiptError::DuplicateReceipt.to_string(),
            "Receipt is already used."
        );
        assert_eq!(
            ReceiptError::NotFound("abc".to_string()).to_string(),
            "No points found for id abc"
        );
        assert_eq!(
            ReceiptError::InvalidUrl("id".to_string()).to_string(),
            "id in url is invalid"
        );
    }

    #[test]
    fn test_internal_hides_detail() {
        let err = ReceiptError::internal("disk I/O error at page 42");
        assert_eq!(err.to_string(), "Internal server error!");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_validation_converts_to_receipt_error() {
        let err: ReceiptError = ValidationError::InvalidDate.into();
        assert!(matches!(err, ReceiptError::Validation(_)));
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "Date format is incorrect. Please use YYYY-MM-DD format."
        );
    }
}
