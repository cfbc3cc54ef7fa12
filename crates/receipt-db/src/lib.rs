//! # receipt-db: Database Layer for Receipt Points
//!
//! This crate provides durable storage for receipts.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Points Data Flow                           │
//! │                                                                         │
//! │  ReceiptService (receipt-api)                                          │
//! │       │  &dyn ReceiptStore                                             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    receipt-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │ ReceiptRepository  │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ impl ReceiptStore  │  │ (embedded) │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   receipts, receipt_items                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use receipt_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("receipts.db")).await?;
//! let store = db.receipts();
//! let id = store.create(&validated, points).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::receipt::ReceiptRepository;
