//! Stock item model and request DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockpile_core::types::{DbId, Timestamp};

/// A row from the `stock_items` table.
///
/// `(color, material_pct)` is unique across all rows; `id` exists only so
/// the update endpoint can address a row directly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockItem {
    pub id: DbId,
    pub color: String,
    /// Material content in percent, `0..=100`.
    pub material_pct: i32,
    /// On-hand quantity, never negative.
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for the income and outcome movement endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct StockMovement {
    pub color: String,
    pub material_pct: i32,
    pub quantity: i32,
}

/// Body for `PUT /api/v1/stock/{id}`.
///
/// Absent fields leave the corresponding stored value unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStockItem {
    pub color: Option<String>,
    pub material_pct: Option<i32>,
    pub quantity: Option<i32>,
}

/// Query parameters for `GET /api/v1/stock/quantity`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuantityParams {
    pub color: String,
    /// Lower percentage bound. Defaults to 0.
    pub min_pct: Option<i32>,
    /// Upper percentage bound. Defaults to 100.
    pub max_pct: Option<i32>,
}
