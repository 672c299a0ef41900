//! Route tree construction.

pub mod health;
pub mod stock;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /stock/quantity     GET   aggregate quantity by color + percentage window
/// /stock/income       POST  register incoming stock
/// /stock/outcome      POST  register outgoing stock
/// /stock/import       POST  bulk load from a delimited file upload
/// /stock/{id}         PUT   update an item's attributes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/stock", stock::router())
}
