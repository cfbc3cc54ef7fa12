//! # Store Interface
//!
//! The persistence contract the receipt pipeline depends on, plus the
//! duplicate check built on top of it.
//!
//! ## Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two identical submissions racing                                       │
//! │                                                                         │
//! │  A: find_by_key → None ─┐                                              │
//! │  B: find_by_key → None ─┤  both pass the pre-check                     │
//! │                         ▼                                               │
//! │  A: create → Ok(id)                                                     │
//! │  B: create → Err(ConstraintViolation)  ← the store is the arbiter      │
//! │                                                                         │
//! │  Callers treat ConstraintViolation exactly like a pre-check hit.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations:
//! - [`MemoryStore`] (this module) - process-local, for tests and embedding
//! - `ReceiptRepository` in `receipt-db` - SQLite with a UNIQUE index

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{Receipt, ReceiptKey, ValidatedReceipt};

// =============================================================================
// Store Error
// =============================================================================

/// Failures a store may report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A receipt with the same key already exists. Nothing was written.
    #[error("receipt key already exists")]
    ConstraintViolation,

    /// The store could not complete the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Store Trait
// =============================================================================

/// Durable keyed storage for receipts and their items.
///
/// ## Contract
/// - `create` writes the receipt and all its items, or nothing
/// - `create` fails with [`StoreError::ConstraintViolation`] when the key is
///   taken, even if a concurrent caller took it a moment ago
/// - stored receipts are never modified
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Stores a validated receipt with its computed points and returns the
    /// new identifier.
    async fn create(&self, receipt: &ValidatedReceipt, points: i64) -> Result<String, StoreError>;

    /// Looks up a receipt by identifier.
    async fn find_by_id(&self, id: &str) -> Result<Option<Receipt>, StoreError>;

    /// Looks up a receipt by its (retailer, date, time) key.
    async fn find_by_key(&self, key: &ReceiptKey) -> Result<Option<Receipt>, StoreError>;

    /// Cheap liveness probe. Stores without a backing service are always up.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// =============================================================================
// Duplicate Checker
// =============================================================================

/// Rejects resubmission of a receipt whose key is already stored.
///
/// This is the fast path only; the store's own constraint in `create` closes
/// the race between two concurrent identical submissions.
#[derive(Debug)]
pub struct DuplicateChecker<'a, S: ReceiptStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ReceiptStore + ?Sized> DuplicateChecker<'a, S> {
    /// Creates a checker over the given store.
    pub fn new(store: &'a S) -> Self {
        DuplicateChecker { store }
    }

    /// Returns `true` when a receipt with this key is already stored.
    pub async fn is_duplicate(&self, key: &ReceiptKey) -> Result<bool, StoreError> {
        Ok(self.store.find_by_key(key).await?.is_some())
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// A process-local [`ReceiptStore`].
///
/// Key uniqueness is enforced under the same lock that inserts, so `create`
/// is atomic with respect to concurrent callers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryTables>,
}

#[derive(Debug, Default)]
struct MemoryTables {
    receipts: HashMap<String, Receipt>,
    keys: HashMap<ReceiptKey, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of stored receipts.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|t| t.receipts.len()).unwrap_or(0)
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tables(&self) -> Result<std::sync::MutexGuard<'_, MemoryTables>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ReceiptStore for MemoryStore {
    async fn create(&self, receipt: &ValidatedReceipt, points: i64) -> Result<String, StoreError> {
        let key = receipt.key();
        let mut tables = self.tables()?;

        if tables.keys.contains_key(&key) {
            return Err(StoreError::ConstraintViolation);
        }

        let id = Uuid::new_v4().to_string();
        tables.keys.insert(key, id.clone());
        tables
            .receipts
            .insert(id.clone(), Receipt::from_validated(id.clone(), receipt, points));

        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Receipt>, StoreError> {
        Ok(self.tables()?.receipts.get(id).cloned())
    }

    async fn find_by_key(&self, key: &ReceiptKey) -> Result<Option<Receipt>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .keys
            .get(key)
            .and_then(|id| tables.receipts.get(id))
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.tables().map(|_| ())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Item;
    use chrono::{NaiveDate, NaiveTime};

    fn gatorade_receipt(items: usize) -> ValidatedReceipt {
        ValidatedReceipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2022, 3, 20).unwrap(),
            purchase_time: NaiveTime::from_hms_opt(14, 33, 0).unwrap(),
            total: Money::from_cents(225 * items as i64),
            items: (0..items)
                .map(|_| Item {
                    short_description: "Gatorade".to_string(),
                    price: Money::from_cents(225),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryStore::new();
        let receipt = gatorade_receipt(4);

        let id = store.create(&receipt, 109).await.unwrap();
        let found = store.find_by_id(&id).await.unwrap().unwrap();

        assert_eq!(found.id, id);
        assert_eq!(found.points, 109);
        assert_eq!(found.items.len(), 4);
        assert_eq!(store.find_by_key(&receipt.key()).await.unwrap(), Some(found));
    }

    #[tokio::test]
    async fn test_duplicate_key_is_rejected_regardless_of_items() {
        let store = MemoryStore::new();
        store.create(&gatorade_receipt(4), 109).await.unwrap();

        let err = store.create(&gatorade_receipt(1), 89).await.unwrap_err();
        assert_eq!(err, StoreError::ConstraintViolation);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.find_by_id("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_checker() {
        let store = MemoryStore::new();
        let receipt = gatorade_receipt(2);
        let checker = DuplicateChecker::new(&store);

        assert!(!checker.is_duplicate(&receipt.key()).await.unwrap());
        store.create(&receipt, 10).await.unwrap();
        assert!(checker.is_duplicate(&receipt.key()).await.unwrap());

        let mut other = receipt.key();
        other.retailer = "m&m corner market".to_string();
        assert!(!checker.is_duplicate(&other).await.unwrap());
    }
}
