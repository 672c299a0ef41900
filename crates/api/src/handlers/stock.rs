//! Handlers for the stock ledger endpoints.
//!
//! Provides the aggregate quantity query, income/outcome movement
//! registration, bulk import from a delimited file upload, and attribute
//! update by id. Boundary validation happens here; the ledger rules
//! themselves live in `StockItemRepo`.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use stockpile_core::import::parse_stock_file;
use stockpile_core::types::DbId;
use stockpile_core::validate::{
    movement_violations, update_violations, validate_pct_range, MAX_MATERIAL_PCT, MIN_MATERIAL_PCT,
};
use stockpile_db::models::stock_item::{QuantityParams, StockMovement, UpdateStockItem};
use stockpile_db::repositories::StockItemRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the uploaded file in bulk-import requests.
const IMPORT_FIELD: &str = "content";

/// Typed response for the bulk-import endpoint.
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub rows_imported: u64,
}

// ---------------------------------------------------------------------------
// Quantity query
// ---------------------------------------------------------------------------

/// GET /api/v1/stock/quantity
///
/// Total on-hand quantity for a color across a material-percentage window.
/// Bounds default to the full `[0, 100]` range.
pub async fn get_quantity(
    State(state): State<AppState>,
    Query(params): Query<QuantityParams>,
) -> AppResult<impl IntoResponse> {
    let min_pct = params.min_pct.unwrap_or(MIN_MATERIAL_PCT);
    let max_pct = params.max_pct.unwrap_or(MAX_MATERIAL_PCT);
    validate_pct_range(min_pct, max_pct)?;

    let total =
        StockItemRepo::sum_quantity_in_range(&state.pool, &params.color, min_pct, max_pct).await?;

    tracing::info!(color = %params.color, min_pct, max_pct, total, "Stock quantity queried");

    Ok(Json(DataResponse { data: total }))
}

// ---------------------------------------------------------------------------
// Movements
// ---------------------------------------------------------------------------

/// POST /api/v1/stock/income
///
/// Register incoming stock. Creates the item on first income for a new
/// (color, material_pct) key.
pub async fn register_income(
    State(state): State<AppState>,
    Json(input): Json<StockMovement>,
) -> AppResult<impl IntoResponse> {
    ensure_valid(movement_violations(
        &input.color,
        input.material_pct,
        input.quantity,
    ))?;

    let item =
        StockItemRepo::register_income(&state.pool, &input.color, input.material_pct, input.quantity)
            .await?;

    tracing::info!(
        color = %item.color,
        material_pct = item.material_pct,
        quantity = input.quantity,
        on_hand = item.quantity,
        "Income registered",
    );

    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/stock/outcome
///
/// Register outgoing stock. Fails with 404 for an unknown key and 400 when
/// the requested amount exceeds the on-hand quantity.
pub async fn register_outcome(
    State(state): State<AppState>,
    Json(input): Json<StockMovement>,
) -> AppResult<impl IntoResponse> {
    ensure_valid(movement_violations(
        &input.color,
        input.material_pct,
        input.quantity,
    ))?;

    let item = StockItemRepo::register_outcome(
        &state.pool,
        &input.color,
        input.material_pct,
        input.quantity,
    )
    .await?;

    tracing::info!(
        color = %item.color,
        material_pct = item.material_pct,
        quantity = input.quantity,
        on_hand = item.quantity,
        "Outcome registered",
    );

    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Bulk import
// ---------------------------------------------------------------------------

/// POST /api/v1/stock/import
///
/// Accept a multipart upload of one semicolon-delimited file (field name
/// `content`), parse and validate it in full, then apply every row as an
/// income movement in file order. Parsing failures reject the whole file
/// before anything persists.
pub async fn import_stock(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some(IMPORT_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            content = Some(bytes.to_vec());
            break;
        }
    }

    let Some(content) = content else {
        return Err(AppError::BadRequest(format!(
            "multipart field {IMPORT_FIELD:?} is required"
        )));
    };
    let text = String::from_utf8(content)
        .map_err(|_| AppError::BadRequest("file must be UTF-8 text".to_string()))?;

    let rows = parse_stock_file(&text)?;
    let rows_imported = StockItemRepo::import_rows(&state.pool, &rows).await?;

    tracing::info!(rows_imported, "Stock file imported");

    Ok(Json(DataResponse {
        data: ImportSummary { rows_imported },
    }))
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// PUT /api/v1/stock/{id}
///
/// Replace the provided attributes of one item. Renaming onto a different
/// item's (color, material_pct) key is rejected with 400; an unknown id
/// returns 404.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStockItem>,
) -> AppResult<impl IntoResponse> {
    ensure_valid(update_violations(
        input.color.as_deref(),
        input.material_pct,
        input.quantity,
    ))?;

    let item = StockItemRepo::update(&state.pool, id, &input).await?;

    tracing::info!(
        id,
        color = %item.color,
        material_pct = item.material_pct,
        quantity = item.quantity,
        "Stock item updated",
    );

    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fail with the full set of boundary-validation messages, if any.
fn ensure_valid(problems: Vec<String>) -> AppResult<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(problems))
    }
}
