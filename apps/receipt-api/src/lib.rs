//! # Receipt API
//!
//! HTTP service awarding loyalty points for purchase receipts.
//!
//! ## Module Organization
//! ```text
//! receipt_api/
//! ├── lib.rs       ◄─── You are here (module exports, tracing setup)
//! ├── config.rs    ◄─── Environment configuration
//! ├── service.rs   ◄─── Submission and lookup use cases
//! ├── routes.rs    ◄─── axum router and handlers
//! └── error.rs     ◄─── ReceiptError → HTTP response
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let service = ReceiptService::new(Arc::new(db.receipts()));
//! axum::serve(listener, router(service)).await?;
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use service::ReceiptService;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=receipt=trace` - Show trace for receipt crates only
/// - Default: `info,receipt=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,receipt=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
