//! # Validation Module
//!
//! Turns a [`RawReceipt`] into a [`ValidatedReceipt`] or the first
//! [`ValidationError`] encountered.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Pipeline                                │
//! │                                                                         │
//! │  1. retailer       present, non-blank      → MissingField("retailer")   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. purchaseDate   present                 → MissingField(...)          │
//! │                    YYYY-MM-DD calendar day → InvalidDate                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  3. purchaseTime   present                 → MissingField(...)          │
//! │                    HH:MM, 24-hour          → InvalidTime                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  4. items          present, non-empty      → MissingField("items")      │
//! │                    each description        → MissingField(...)          │
//! │                    each price              → MissingField("price")      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  5. total          present                 → MissingField("total")      │
//! │                    == formatted item sum   → InvalidFieldValue("total") │
//! │                                                                         │
//! │  The first failure wins; nothing is accumulated.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use receipt_core::validation::validate_purchase_date;
//!
//! assert!(validate_purchase_date(Some("2022-01-01")).is_ok());
//! assert!(validate_purchase_date(Some("2022/01/01")).is_err());
//! ```

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Item, RawItem, RawReceipt, ValidatedReceipt};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Names
// =============================================================================
// These appear inside "Mandatory value {field} not found." and are part of
// the message contract.

pub const FIELD_RETAILER: &str = "retailer";
pub const FIELD_PURCHASE_DATE: &str = "purchase date";
pub const FIELD_PURCHASE_TIME: &str = "purchase time";
pub const FIELD_ITEMS: &str = "items";
pub const FIELD_SHORT_DESCRIPTION: &str = "short description";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_TOTAL: &str = "total";

// =============================================================================
// Receipt Validator
// =============================================================================

/// Validates a whole submission in the fixed order retailer → date → time →
/// items → total.
///
/// ## Example
/// ```rust
/// use receipt_core::{validation::validate_receipt, RawItem, RawReceipt, ValidationError};
///
/// let raw = RawReceipt {
///     retailer: None,
///     purchase_date: Some("2022-01-01".into()),
///     purchase_time: Some("13:01".into()),
///     total: Some("1.00".into()),
///     items: Some(vec![RawItem::new("Gum", "1.00")]),
/// };
/// assert_eq!(
///     validate_receipt(&raw),
///     Err(ValidationError::MissingField("retailer".into()))
/// );
/// ```
pub fn validate_receipt(raw: &RawReceipt) -> ValidationResult<ValidatedReceipt> {
    let retailer = validate_retailer(raw.retailer.as_deref())?;
    let purchase_date = validate_purchase_date(raw.purchase_date.as_deref())?;
    let purchase_time = validate_purchase_time(raw.purchase_time.as_deref())?;
    let items = validate_items(raw.items.as_deref())?;
    let total = validate_total(raw.total.as_deref(), &items)?;

    Ok(ValidatedReceipt {
        retailer: retailer.to_string(),
        purchase_date,
        purchase_time,
        total,
        items,
    })
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the retailer name.
///
/// ## Rules
/// - Must be present
/// - Must contain something other than whitespace
///
/// The returned name is the submitted text, untrimmed.
pub fn validate_retailer(retailer: Option<&str>) -> ValidationResult<&str> {
    match retailer {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ValidationError::missing(FIELD_RETAILER)),
    }
}

/// Validates the purchase date.
///
/// ## Rules
/// - Must be present
/// - Must be exactly `YYYY-MM-DD` (4-2-2 digit groups)
/// - Must be a real calendar day (`2022-02-30` is rejected)
pub fn validate_purchase_date(date: Option<&str>) -> ValidationResult<NaiveDate> {
    let date = date.ok_or_else(|| ValidationError::missing(FIELD_PURCHASE_DATE))?;

    if !matches_digit_groups(date, '-', &[4, 2, 2]) {
        return Err(ValidationError::InvalidDate);
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

/// Validates the purchase time.
///
/// ## Rules
/// - Must be present
/// - Must be exactly `HH:MM` with hour 00-23 and minute 00-59
pub fn validate_purchase_time(time: Option<&str>) -> ValidationResult<NaiveTime> {
    let time = time.ok_or_else(|| ValidationError::missing(FIELD_PURCHASE_TIME))?;

    if !matches_digit_groups(time, ':', &[2, 2]) {
        return Err(ValidationError::InvalidTime);
    }

    NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| ValidationError::InvalidTime)
}

/// Validates the item list.
///
/// ## Rules
/// - Must be present and non-empty
/// - Every item needs a non-empty `shortDescription`
/// - Every item needs a `price` in `D+.DD` form
///
/// Items are checked in order; the first offending item decides the error.
pub fn validate_items(items: Option<&[RawItem]>) -> ValidationResult<Vec<Item>> {
    let items = match items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ValidationError::missing(FIELD_ITEMS)),
    };

    items.iter().map(validate_item).collect()
}

fn validate_item(item: &RawItem) -> ValidationResult<Item> {
    let short_description = match item.short_description.as_deref() {
        Some(desc) if !desc.is_empty() => desc,
        _ => return Err(ValidationError::missing(FIELD_SHORT_DESCRIPTION)),
    };

    let price = item
        .price
        .as_deref()
        .and_then(|p| p.parse::<Money>().ok())
        .ok_or_else(|| ValidationError::missing(FIELD_PRICE))?;

    Ok(Item {
        short_description: short_description.to_string(),
        price,
    })
}

/// Validates the total against the item prices.
///
/// ## Rules
/// - Must be present
/// - The item sum, formatted with two fractional digits, must equal the
///   submitted text exactly
///
/// The comparison is on text: `"35.350"` does not equal `"35.35"` even though
/// the values are equal. A sum too large to represent never matches.
pub fn validate_total(total: Option<&str>, items: &[Item]) -> ValidationResult<Money> {
    let total = total.ok_or_else(|| ValidationError::missing(FIELD_TOTAL))?;

    let sum = items
        .iter()
        .try_fold(Money::zero(), |acc, item| acc.checked_add(item.price))
        .ok_or_else(|| ValidationError::invalid_value(FIELD_TOTAL))?;

    if sum.to_string() != total {
        return Err(ValidationError::invalid_value(FIELD_TOTAL));
    }

    Ok(sum)
}

/// True when `value` is ASCII digit groups of the given widths joined by `sep`.
fn matches_digit_groups(value: &str, sep: char, widths: &[usize]) -> bool {
    let groups: Vec<&str> = value.split(sep).collect();

    groups.len() == widths.len()
        && groups
            .iter()
            .zip(widths)
            .all(|(group, &width)| {
                group.len() == width && group.bytes().all(|b| b.is_ascii_digit())
            })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn target_receipt() -> RawReceipt {
        RawReceipt {
            retailer: Some("Target".to_string()),
            purchase_date: Some("2022-01-01".to_string()),
            purchase_time: Some("13:01".to_string()),
            total: Some("35.35".to_string()),
            items: Some(vec![
                RawItem::new("Mountain Dew 12PK", "6.49"),
                RawItem::new("Emils Cheese Pizza", "12.25"),
                RawItem::new("Knorr Creamy Chicken", "1.26"),
                RawItem::new("Doritos Nacho Cheese", "3.35"),
                RawItem::new("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ]),
        }
    }

    #[test]
    fn test_valid_receipt() {
        let receipt = validate_receipt(&target_receipt()).unwrap();
        assert_eq!(receipt.retailer, "Target");
        assert_eq!(receipt.purchase_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(receipt.purchase_time, NaiveTime::from_hms_opt(13, 1, 0).unwrap());
        assert_eq!(receipt.total.cents(), 3535);
        assert_eq!(receipt.items.len(), 5);
        assert_eq!(receipt.items[4].short_description, "   Klarbrunn 12-PK 12 FL OZ  ");
    }

    #[test]
    fn test_missing_retailer() {
        let mut raw = target_receipt();
        raw.retailer = None;
        assert_eq!(validate_receipt(&raw), Err(ValidationError::missing("retailer")));

        raw.retailer = Some("   ".to_string());
        assert_eq!(validate_receipt(&raw), Err(ValidationError::missing("retailer")));
    }

    #[test]
    fn test_invalid_date() {
        let cases = [
            "2022/01/01",
            "2022-1-01",
            "22-01-01",
            "2022-02-30",
            "2022-13-01",
            "",
            "2022-01-01T",
        ];
        for bad in cases {
            assert_eq!(
                validate_purchase_date(Some(bad)),
                Err(ValidationError::InvalidDate),
                "accepted {bad:?}"
            );
        }
        assert_eq!(
            validate_purchase_date(None),
            Err(ValidationError::missing(FIELD_PURCHASE_DATE))
        );
    }

    #[test]
    fn test_invalid_time() {
        for bad in ["24:00", "1:05", "13:60", "13-01", "13:01:00", "", "ab:cd"] {
            assert_eq!(
                validate_purchase_time(Some(bad)),
                Err(ValidationError::InvalidTime),
                "accepted {bad:?}"
            );
        }
        assert!(validate_purchase_time(Some("00:00")).is_ok());
        assert!(validate_purchase_time(Some("23:59")).is_ok());
    }

    #[test]
    fn test_items_rules() {
        assert_eq!(validate_items(None), Err(ValidationError::missing("items")));
        assert_eq!(validate_items(Some(&[])), Err(ValidationError::missing("items")));

        let no_desc = [RawItem {
            short_description: None,
            price: Some("1.00".to_string()),
        }];
        assert_eq!(
            validate_items(Some(&no_desc)),
            Err(ValidationError::missing("short description"))
        );

        let empty_desc = [RawItem::new("", "1.00")];
        assert_eq!(
            validate_items(Some(&empty_desc)),
            Err(ValidationError::missing("short description"))
        );

        let bad_price = [RawItem::new("Gum", "one dollar")];
        assert_eq!(validate_items(Some(&bad_price)), Err(ValidationError::missing("price")));

        let no_price = [RawItem {
            short_description: Some("Gum".to_string()),
            price: None,
        }];
        assert_eq!(validate_items(Some(&no_price)), Err(ValidationError::missing("price")));
    }

    #[test]
    fn test_first_offending_item_wins() {
        let items = [
            RawItem::new("Gum", "1.00"),
            RawItem::new("Soda", "bad"),
            RawItem::new("", "1.00"),
        ];
        assert_eq!(validate_items(Some(&items)), Err(ValidationError::missing("price")));
    }

    #[test]
    fn test_total_is_compared_as_text() {
        let mut raw = target_receipt();

        raw.total = Some("35.350".to_string());
        assert_eq!(validate_receipt(&raw), Err(ValidationError::invalid_value("total")));

        raw.total = Some("35.36".to_string());
        assert_eq!(validate_receipt(&raw), Err(ValidationError::invalid_value("total")));

        raw.total = None;
        assert_eq!(validate_receipt(&raw), Err(ValidationError::missing("total")));
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let mut raw = target_receipt();

        raw.items = Some(vec![RawItem::new("Yacht", "50000000000000000.00"); 2]);
        raw.total = Some("100000000000000000.00".to_string());
        assert_eq!(validate_receipt(&raw), Err(ValidationError::invalid_value("total")));

        // A wrapped sum would format as "2.01"
        raw.items = Some(vec![
            RawItem::new("Yacht", "61489146912365172.72"),
            RawItem::new("Yacht", "61489146912365172.72"),
            RawItem::new("Yacht", "61489146912365172.73"),
        ]);
        raw.total = Some("2.01".to_string());
        assert_eq!(validate_receipt(&raw), Err(ValidationError::invalid_value("total")));
    }

    #[test]
    fn test_order_is_retailer_date_time_items_total() {
        let raw = RawReceipt {
            retailer: Some("Target".to_string()),
            purchase_date: Some("2022/01/01".to_string()),
            purchase_time: Some("99:99".to_string()),
            total: None,
            items: None,
        };
        assert_eq!(validate_receipt(&raw), Err(ValidationError::InvalidDate));

        let raw = RawReceipt {
            purchase_date: Some("2022-01-01".to_string()),
            ..raw
        };
        assert_eq!(validate_receipt(&raw), Err(ValidationError::InvalidTime));

        let raw = RawReceipt {
            purchase_time: Some("13:01".to_string()),
            ..raw
        };
        assert_eq!(validate_receipt(&raw), Err(ValidationError::missing("items")));

        let raw = RawReceipt {
            items: Some(vec![RawItem::new("Gum", "1.00")]),
            ..raw
        };
        assert_eq!(validate_receipt(&raw), Err(ValidationError::missing("total")));
    }
}
