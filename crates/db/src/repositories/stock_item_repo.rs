//! Repository for the `stock_items` table.
//!
//! Provides key/id lookups, the range-sum aggregate, and the transactional
//! ledger operations (income, outcome, update, bulk import). Every mutation
//! is either a single atomic statement or an explicit transaction that locks
//! the affected row, so two concurrent movements on the same
//! (color, material_pct) key cannot lose an update.

use sqlx::PgPool;
use stockpile_core::import::StockRow;
use stockpile_core::types::DbId;

use crate::models::stock_item::{StockItem, UpdateStockItem};

/// Column list for `stock_items` queries.
const STOCK_COLUMNS: &str = "id, color, material_pct, quantity, created_at, updated_at";

/// Failures produced by the ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("no stock item for color {color:?} with {material_pct}% material")]
    KeyNotFound { color: String, material_pct: i32 },

    #[error("no stock item with id {id}")]
    IdNotFound { id: DbId },

    #[error("not enough stock: {available} on hand, {requested} requested")]
    InsufficientQuantity { available: i32, requested: i32 },

    #[error(
        "stock item {occupied_by} already holds this color and material percentage; \
         adjust its quantity instead of creating a duplicate"
    )]
    KeyConflict { occupied_by: DbId },

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Lookups and ledger operations for stock items.
pub struct StockItemRepo;

impl StockItemRepo {
    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Find an item by its (color, material_pct) business key.
    pub async fn find_by_key(
        pool: &PgPool,
        color: &str,
        material_pct: i32,
    ) -> Result<Option<StockItem>, sqlx::Error> {
        let query =
            format!("SELECT {STOCK_COLUMNS} FROM stock_items WHERE color = $1 AND material_pct = $2");
        sqlx::query_as::<_, StockItem>(&query)
            .bind(color)
            .bind(material_pct)
            .fetch_optional(pool)
            .await
    }

    /// Find an item by its surrogate id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StockItem>, sqlx::Error> {
        let query = format!("SELECT {STOCK_COLUMNS} FROM stock_items WHERE id = $1");
        sqlx::query_as::<_, StockItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total on-hand quantity for a color across a percentage window.
    ///
    /// Returns 0 when no rows match.
    pub async fn sum_quantity_in_range(
        pool: &PgPool,
        color: &str,
        min_pct: i32,
        max_pct: i32,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(quantity), 0) \
             FROM stock_items \
             WHERE color = $1 AND material_pct BETWEEN $2 AND $3",
        )
        .bind(color)
        .bind(min_pct)
        .bind(max_pct)
        .fetch_one(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Ledger operations
    // -----------------------------------------------------------------------

    /// Register incoming stock for a key, creating the item on first income.
    ///
    /// A single upsert statement: the row either starts at the movement's
    /// quantity or accumulates onto the existing amount atomically.
    pub async fn register_income(
        pool: &PgPool,
        color: &str,
        material_pct: i32,
        quantity: i32,
    ) -> Result<StockItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO stock_items (color, material_pct, quantity) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (color, material_pct) DO UPDATE \
                 SET quantity = stock_items.quantity + EXCLUDED.quantity, \
                     updated_at = now() \
             RETURNING {STOCK_COLUMNS}"
        );
        sqlx::query_as::<_, StockItem>(&query)
            .bind(color)
            .bind(material_pct)
            .bind(quantity)
            .fetch_one(pool)
            .await
    }

    /// Register outgoing stock for a key.
    ///
    /// Locks the row for the duration of the check-then-subtract so a
    /// concurrent outcome cannot overdraw the same item.
    pub async fn register_outcome(
        pool: &PgPool,
        color: &str,
        material_pct: i32,
        quantity: i32,
    ) -> Result<StockItem, LedgerError> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {STOCK_COLUMNS} FROM stock_items \
             WHERE color = $1 AND material_pct = $2 \
             FOR UPDATE"
        );
        let Some(item) = sqlx::query_as::<_, StockItem>(&query)
            .bind(color)
            .bind(material_pct)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(LedgerError::KeyNotFound {
                color: color.to_string(),
                material_pct,
            });
        };

        if item.quantity < quantity {
            return Err(LedgerError::InsufficientQuantity {
                available: item.quantity,
                requested: quantity,
            });
        }

        let query = format!(
            "UPDATE stock_items \
             SET quantity = quantity - $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {STOCK_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, StockItem>(&query)
            .bind(item.id)
            .bind(quantity)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Replace an item's provided attributes by id.
    ///
    /// A rename onto another item's (color, material_pct) key is rejected
    /// with [`LedgerError::KeyConflict`]; updating an item onto its own
    /// current key is a no-op rename and allowed. Absent fields keep their
    /// stored values. A partial rename that lands on an occupied key falls
    /// through to the `uq_stock_items_color_pct` index.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStockItem,
    ) -> Result<StockItem, LedgerError> {
        let mut tx = pool.begin().await?;

        if let (Some(color), Some(material_pct)) = (input.color.as_deref(), input.material_pct) {
            let query = format!(
                "SELECT {STOCK_COLUMNS} FROM stock_items \
                 WHERE color = $1 AND material_pct = $2 \
                 FOR UPDATE"
            );
            let occupant = sqlx::query_as::<_, StockItem>(&query)
                .bind(color)
                .bind(material_pct)
                .fetch_optional(&mut *tx)
                .await?;
            if let Some(occupant) = occupant {
                if occupant.id != id {
                    return Err(LedgerError::KeyConflict {
                        occupied_by: occupant.id,
                    });
                }
            }
        }

        let target: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM stock_items WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if target.is_none() {
            return Err(LedgerError::IdNotFound { id });
        }

        let query = format!(
            "UPDATE stock_items \
             SET color = COALESCE($2, color), \
                 material_pct = COALESCE($3, material_pct), \
                 quantity = COALESCE($4, quantity), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {STOCK_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, StockItem>(&query)
            .bind(id)
            .bind(input.color.as_deref())
            .bind(input.material_pct)
            .bind(input.quantity)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Apply parsed bulk-import rows in file order.
    ///
    /// Each row goes through the same upsert as [`Self::register_income`],
    /// so a key appearing twice in one file accumulates across both
    /// occurrences. Rows are independent: a storage failure on row N leaves
    /// rows 1..N applied.
    pub async fn import_rows(pool: &PgPool, rows: &[StockRow]) -> Result<u64, sqlx::Error> {
        let mut applied: u64 = 0;
        for row in rows {
            Self::register_income(pool, &row.color, row.material_pct, row.quantity).await?;
            applied += 1;
        }
        tracing::debug!(applied, "Bulk-import rows persisted");
        Ok(applied)
    }
}
