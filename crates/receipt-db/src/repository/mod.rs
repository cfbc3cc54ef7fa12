//! # Repository Module
//!
//! Database repository implementations for the receipt store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ReceiptService                                                        │
//! │       │                                                                 │
//! │       │  store.create(&validated, points)                              │
//! │       ▼                                                                 │
//! │  ReceiptRepository (impl ReceiptStore)                                 │
//! │  ├── create(&self, receipt, points)                                    │
//! │  ├── find_by_id(&self, id)                                             │
//! │  └── find_by_key(&self, key)                                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`receipt::ReceiptRepository`] - Receipt and item persistence

pub mod receipt;
