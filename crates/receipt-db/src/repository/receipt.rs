//! # Receipt Repository
//!
//! SQLite-backed [`ReceiptStore`].
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       create(receipt, points)                           │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │   ├── INSERT receipts        ← UNIQUE(retailer, date, time) may fail   │
//! │   ├── INSERT receipt_items   (one row per item, ordered by position)   │
//! │   └── ...                                                              │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Any failure rolls the whole transaction back (tx dropped uncommitted) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Column Encoding
//! - `purchase_date`: `YYYY-MM-DD` text
//! - `purchase_time`: `HH:MM` text
//! - money: integer cents

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use receipt_core::{Item, Money, Receipt, ReceiptKey, ReceiptStore, StoreError, ValidatedReceipt};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ReceiptRow {
    id: String,
    retailer: String,
    purchase_date: String,
    purchase_time: String,
    total_cents: i64,
    points: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    short_description: String,
    price_cents: i64,
}

const SELECT_RECEIPT: &str = r#"
    SELECT id, retailer, purchase_date, purchase_time,
           total_cents, points, created_at
    FROM receipts
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Inserts the receipt and its items in one transaction.
    async fn insert(&self, receipt: &ValidatedReceipt, points: i64) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();

        debug!(
            id = %id,
            retailer = %receipt.retailer,
            items = receipt.items.len(),
            "Inserting receipt"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO receipts (
                id, retailer, purchase_date, purchase_time,
                total_cents, points, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&id)
        .bind(&receipt.retailer)
        .bind(receipt.purchase_date.format(DATE_FORMAT).to_string())
        .bind(receipt.purchase_time.format(TIME_FORMAT).to_string())
        .bind(receipt.total.cents())
        .bind(points)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        for (position, item) in receipt.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO receipt_items (
                    id, receipt_id, position, short_description, price_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&id)
            .bind(position as i64)
            .bind(&item.short_description)
            .bind(item.price.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(id)
    }

    /// Gets a receipt by ID, with its items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Receipt>> {
        let row: Option<ReceiptRow> = sqlx::query_as(&format!("{SELECT_RECEIPT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Gets a receipt by its (retailer, date, time) key.
    pub async fn get_by_key(&self, key: &ReceiptKey) -> DbResult<Option<Receipt>> {
        let row: Option<ReceiptRow> = sqlx::query_as(&format!(
            "{SELECT_RECEIPT} WHERE retailer = ?1 AND purchase_date = ?2 AND purchase_time = ?3"
        ))
        .bind(&key.retailer)
        .bind(key.purchase_date.format(DATE_FORMAT).to_string())
        .bind(key.purchase_time.format(TIME_FORMAT).to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Loads the items of a receipt row and converts it to the domain type.
    async fn hydrate(&self, row: ReceiptRow) -> DbResult<Receipt> {
        let items: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT short_description, price_cents
            FROM receipt_items
            WHERE receipt_id = ?1
            ORDER BY position
            "#,
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        let purchase_date = NaiveDate::parse_from_str(&row.purchase_date, DATE_FORMAT)
            .map_err(|e| DbError::corrupt("receipts", format!("purchase_date: {e}")))?;
        let purchase_time = NaiveTime::parse_from_str(&row.purchase_time, TIME_FORMAT)
            .map_err(|e| DbError::corrupt("receipts", format!("purchase_time: {e}")))?;

        Ok(Receipt {
            id: row.id,
            retailer: row.retailer,
            purchase_date,
            purchase_time,
            total: Money::from_cents(row.total_cents),
            points: row.points,
            items: items
                .into_iter()
                .map(|item| Item {
                    short_description: item.short_description,
                    price: Money::from_cents(item.price_cents),
                })
                .collect(),
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl ReceiptStore for ReceiptRepository {
    async fn create(&self, receipt: &ValidatedReceipt, points: i64) -> Result<String, StoreError> {
        self.insert(receipt, points).await.map_err(|err| {
            debug!(error = %err, "Receipt insert failed");
            StoreError::from(err)
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Receipt>, StoreError> {
        Ok(self.get_by_id(id).await?)
    }

    async fn find_by_key(&self, key: &ReceiptKey) -> Result<Option<Receipt>, StoreError> {
        Ok(self.get_by_key(key).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::from(DbError::from(e)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
