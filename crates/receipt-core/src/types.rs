//! # Domain Types
//!
//! Core domain types used throughout the receipt points service.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  validate   ┌──────────────────┐   store   ┌─────┐│
//! │  │   RawReceipt    │ ──────────► │ ValidatedReceipt │ ────────► │Rcpt ││
//! │  │  ─────────────  │             │  ──────────────  │  +points  │ id  ││
//! │  │  Option<String> │             │  NaiveDate       │  +id      │     ││
//! │  │  everywhere     │             │  NaiveTime       │           └─────┘│
//! │  │  RawItem[]      │             │  Money, Item[]   │                   │
//! │  └─────────────────┘             └──────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `id`: UUID v4 string, assigned by the store, immutable
//! - [`ReceiptKey`]: (retailer, purchase date, purchase time), unique across
//!   all stored receipts

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Submission Input
// =============================================================================

/// A receipt exactly as submitted.
///
/// Every field is optional so absence reaches the validator instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub retailer: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_time: Option<String>,
    pub total: Option<String>,
    pub items: Option<Vec<RawItem>>,
}

/// One submitted line item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub short_description: Option<String>,
    pub price: Option<String>,
}

impl RawItem {
    /// Creates an item with both fields present.
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        RawItem {
            short_description: Some(short_description.into()),
            price: Some(price.into()),
        }
    }
}

// =============================================================================
// Validated Receipt
// =============================================================================

/// A line item that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Description as submitted (untrimmed).
    pub short_description: String,
    pub price: Money,
}

/// A submission that passed every validation rule.
///
/// ## Invariants
/// - `items` is non-empty
/// - the sum of item prices formats to the submitted total text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedReceipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub total: Money,
    pub items: Vec<Item>,
}

impl ValidatedReceipt {
    /// Returns the uniqueness key of this receipt.
    pub fn key(&self) -> ReceiptKey {
        ReceiptKey {
            retailer: self.retailer.clone(),
            purchase_date: self.purchase_date,
            purchase_time: self.purchase_time,
        }
    }
}

// =============================================================================
// Receipt Key
// =============================================================================

/// The (retailer, date, time) triple that identifies a physical receipt.
///
/// Retailer comparison is exact: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReceiptKey {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
}

// =============================================================================
// Stored Receipt
// =============================================================================

/// A receipt as held by the store.
///
/// Never updated after creation; `points` was computed once from the
/// validated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub total: Money,
    /// Always >= 0.
    pub points: i64,
    pub items: Vec<Item>,
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    /// Builds the stored form of a validated receipt.
    pub fn from_validated(id: String, receipt: &ValidatedReceipt, points: i64) -> Self {
        Receipt {
            id,
            retailer: receipt.retailer.clone(),
            purchase_date: receipt.purchase_date,
            purchase_time: receipt.purchase_time,
            total: receipt.total,
            points,
            items: receipt.items.clone(),
            created_at: Utc::now(),
        }
    }

    /// Returns the uniqueness key of this receipt.
    pub fn key(&self) -> ReceiptKey {
        ReceiptKey {
            retailer: self.retailer.clone(),
            purchase_date: self.purchase_date,
            purchase_time: self.purchase_time,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
