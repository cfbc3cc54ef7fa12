//! # Receipt Service
//!
//! The submission and lookup use cases.
//!
//! ## Submission Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         submit(raw)                                     │
//! │                                                                         │
//! │  RawReceipt                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_receipt ──── Err ──► ReceiptError::Validation                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DuplicateChecker ──── hit ──► ReceiptError::DuplicateReceipt          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  points::compute (pure)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.create ──── ConstraintViolation ──► DuplicateReceipt            │
//! │       │        └── Unavailable / timeout ─► Internal                    │
//! │       ▼                                                                 │
//! │  id                                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written before validation and the duplicate check pass. Every
//! store call is bounded by the configured timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use receipt_core::validation::validate_receipt;
use receipt_core::{
    points, DuplicateChecker, RawReceipt, ReceiptError, ReceiptResult, ReceiptStore, StoreError,
};
use tracing::{debug, info, warn};

/// Default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Orchestrates validation, duplicate detection, scoring and storage.
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct ReceiptService {
    store: Arc<dyn ReceiptStore>,
    store_timeout: Duration,
}

impl std::fmt::Debug for ReceiptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptService")
            .field("store_timeout", &self.store_timeout)
            .finish_non_exhaustive()
    }
}

impl ReceiptService {
    /// Creates a service over the given store with the default timeout.
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        ReceiptService {
            store,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets the bound applied to every store call.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Validates, scores and stores a submission. Returns the new id.
    pub async fn submit(&self, raw: RawReceipt) -> ReceiptResult<String> {
        let receipt = validate_receipt(&raw)?;
        let key = receipt.key();

        let checker = DuplicateChecker::new(self.store.as_ref());
        if self.bounded("find_by_key", checker.is_duplicate(&key)).await? {
            warn!(
                retailer = %key.retailer,
                date = %key.purchase_date,
                time = %key.purchase_time,
                "Duplicate receipt rejected"
            );
            return Err(ReceiptError::DuplicateReceipt);
        }

        let points = points::compute(&receipt);
        debug!(retailer = %receipt.retailer, points, "Points computed");

        match tokio::time::timeout(self.store_timeout, self.store.create(&receipt, points)).await {
            Ok(Ok(id)) => {
                info!(id = %id, points, "Receipt stored");
                Ok(id)
            }
            Ok(Err(StoreError::ConstraintViolation)) => {
                warn!(retailer = %key.retailer, "Duplicate receipt rejected at insert");
                Err(ReceiptError::DuplicateReceipt)
            }
            Ok(Err(StoreError::Unavailable(detail))) => Err(ReceiptError::internal(detail)),
            Err(_) => Err(ReceiptError::internal(format!(
                "create timed out after {:?}",
                self.store_timeout
            ))),
        }
    }

    /// Returns the points of a stored receipt.
    ///
    /// ## Errors
    /// - `InvalidUrl("id")` when `id` is blank
    /// - `NotFound(id)` for any id that was never created
    pub async fn lookup(&self, id: &str) -> ReceiptResult<i64> {
        if id.trim().is_empty() {
            return Err(ReceiptError::InvalidUrl("id".to_string()));
        }

        match self.bounded("find_by_id", self.store.find_by_id(id)).await? {
            Some(receipt) => Ok(receipt.points),
            None => Err(ReceiptError::NotFound(id.to_string())),
        }
    }

    /// Whether the store answers within the timeout.
    pub async fn is_healthy(&self) -> bool {
        self.bounded("ping", self.store.ping()).await.is_ok()
    }

    /// Runs a read-only store call under the timeout. Every failure is
    /// internal.
    async fn bounded<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> ReceiptResult<T> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(ReceiptError::internal(format!("{op}: {err}"))),
            Err(_) => Err(ReceiptError::internal(format!(
                "{op} timed out after {:?}",
                self.store_timeout
            ))),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
