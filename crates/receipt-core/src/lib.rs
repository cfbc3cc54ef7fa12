//! # receipt-core: Pure Business Logic for Receipt Points
//!
//! This crate is the **heart** of the receipt points service. It validates
//! submitted receipts, detects resubmissions and computes loyalty points.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Points Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 receipt-api (HTTP adapter)                      │   │
//! │  │        POST /receipts/process   GET /receipts/{id}/points       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ receipt-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ validation│  │  points   │  │ duplicate │  │   store   │  │   │
//! │  │   │ Validator │  │ R1 .. R7  │  │  Checker  │  │  (trait)  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 receipt-db (SQLite ReceiptStore)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Submission input and validated receipt types
//! - [`money`] - Fixed-point cents amount (no floating point!)
//! - [`error`] - Validation and receipt error types
//! - [`validation`] - Ordered receipt validation
//! - [`points`] - The seven points rules
//! - [`store`] - Store interface, duplicate checker, in-memory store
//!
//! ## Example Usage
//!
//! ```rust
//! use receipt_core::{points, validation, RawItem, RawReceipt};
//!
//! let raw = RawReceipt {
//!     retailer: Some("Walgreens".to_string()),
//!     purchase_date: Some("2022-01-02".to_string()),
//!     purchase_time: Some("08:13".to_string()),
//!     total: Some("2.65".to_string()),
//!     items: Some(vec![
//!         RawItem::new("Pepsi - 12-oz", "1.25"),
//!         RawItem::new("Dasani", "1.40"),
//!     ]),
//! };
//!
//! let receipt = validation::validate_receipt(&raw).unwrap();
//! assert_eq!(points::compute(&receipt), 15);
//! ```

pub mod error;
pub mod money;
pub mod points;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ReceiptError, ReceiptResult, ValidationError};
pub use money::Money;
pub use store::{DuplicateChecker, MemoryStore, ReceiptStore, StoreError};
pub use types::*;
