//! Route definitions for the stock ledger, mounted at `/stock`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::stock;
use crate::state::AppState;

/// ```text
/// GET  /quantity   -> get_quantity
/// POST /income     -> register_income
/// POST /outcome    -> register_outcome
/// POST /import     -> import_stock
/// PUT  /{id}       -> update_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quantity", get(stock::get_quantity))
        .route("/income", post(stock::register_income))
        .route("/outcome", post(stock::register_outcome))
        .route("/import", post(stock::import_stock))
        .route("/{id}", put(stock::update_item))
}
