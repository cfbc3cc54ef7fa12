//! # Points Module
//!
//! Computes loyalty points for a validated receipt.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule  Points                 Condition                                 │
//! │  ────  ─────────────────────  ─────────────────────────────────────     │
//! │  R1    +1 per character       alphanumeric characters in retailer       │
//! │  R2    +50                    total has no cents                        │
//! │  R3    +25                    total is a multiple of 0.25               │
//! │  R4    +5 per pair            floor(item count / 2)                     │
//! │  R5    +ceil(price × 0.2)     trimmed description length % 3 == 0       │
//! │  R6    +6                     purchase day of month is odd              │
//! │  R7    +10                    14:00 <= purchase time < 16:00            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is pure and independent; [`compute`] is their sum. There is no
//! shared state, so concurrent callers need no coordination.
//!
//! ## Example
//! ```rust
//! use receipt_core::points::retailer_points;
//!
//! assert_eq!(retailer_points("M&M Corner Market"), 14);
//! ```

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use std::ops::Range;

use crate::money::Money;
use crate::types::{Item, ValidatedReceipt};

const ROUND_DOLLAR_POINTS: i64 = 50;
const QUARTER_MULTIPLE_POINTS: i64 = 25;
const ITEM_PAIR_POINTS: i64 = 5;
const ODD_DAY_POINTS: i64 = 6;
const AFTERNOON_POINTS: i64 = 10;

/// 14:00 inclusive to 16:00 exclusive.
const AFTERNOON_HOURS: Range<u32> = 14..16;

/// Computes the total points for a receipt.
///
/// Deterministic: the same receipt always yields the same value.
pub fn compute(receipt: &ValidatedReceipt) -> i64 {
    retailer_points(&receipt.retailer)
        + round_dollar_points(receipt.total)
        + quarter_multiple_points(receipt.total)
        + item_pair_points(receipt.items.len())
        + receipt.items.iter().map(description_points).sum::<i64>()
        + odd_day_points(receipt.purchase_date)
        + afternoon_points(receipt.purchase_time)
}

/// R1: one point per alphanumeric character in the retailer name.
pub fn retailer_points(retailer: &str) -> i64 {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as i64
}

/// R2: 50 points if the total is a round dollar amount.
pub fn round_dollar_points(total: Money) -> i64 {
    if total.is_round_dollar() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

/// R3: 25 points if the total is a multiple of 0.25.
pub fn quarter_multiple_points(total: Money) -> i64 {
    if total.is_multiple_of_quarter() {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// R4: 5 points for every two items.
pub fn item_pair_points(item_count: usize) -> i64 {
    (item_count / 2) as i64 * ITEM_PAIR_POINTS
}

/// R5: `ceil(price × 0.2)` when the trimmed description length is a
/// multiple of 3.
///
/// Length is counted in characters, not bytes.
pub fn description_points(item: &Item) -> i64 {
    let trimmed_len = item.short_description.trim().chars().count();
    if trimmed_len % 3 == 0 {
        item.price.fifth_rounded_up()
    } else {
        0
    }
}

/// R6: 6 points if the day of the month is odd.
pub fn odd_day_points(date: NaiveDate) -> i64 {
    if date.day() % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

/// R7: 10 points if the purchase happened from 14:00 up to (not including)
/// 16:00.
pub fn afternoon_points(time: NaiveTime) -> i64 {
    if AFTERNOON_HOURS.contains(&time.hour()) {
        AFTERNOON_POINTS
    } else {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
