//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (receipt-core)                                             │
//! │  ├── UniqueViolation → ConstraintViolation                             │
//! │  └── everything else → Unavailable                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReceiptError::DuplicateReceipt / ReceiptError::Internal               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use receipt_core::StoreError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - A receipt with the same (retailer, purchase_date, purchase_time)
    ///   already exists
    #[error("Unique constraint failed: {constraint}")]
    UniqueViolation { constraint: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored row could not be turned back into a domain value.
    #[error("Corrupt row in {table}: {reason}")]
    CorruptRow { table: String, reason: String },

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a CorruptRow error.
    pub fn corrupt(table: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::CorruptRow {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → Constraint kind, else QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    // "UNIQUE constraint failed: receipts.retailer, ..."
                    let constraint = db_err
                        .message()
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation { constraint }
                } else if db_err.is_foreign_key_violation() {
                    DbError::ForeignKeyViolation {
                        message: db_err.message().to_string(),
                    }
                } else {
                    DbError::QueryFailed(db_err.message().to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Only a unique violation is a caller-visible outcome; every other failure
/// is the store being unavailable.
impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { .. } => StoreError::ConstraintViolation,
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let unique = DbError::UniqueViolation {
            constraint: "receipts.retailer".to_string(),
        };
        assert_eq!(StoreError::from(unique), StoreError::ConstraintViolation);

        let down: StoreError = DbError::PoolExhausted.into();
        assert_eq!(down, StoreError::Unavailable("Connection pool exhausted".to_string()));
    }

    #[test]
    fn test_pool_errors() {
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::PoolExhausted));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }
}
