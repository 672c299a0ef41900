//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Mutating stock operations run
//! as single atomic statements or explicit transactions so concurrent
//! movements on the same (color, material_pct) key cannot interleave.

pub mod stock_item_repo;

pub use stock_item_repo::{LedgerError, StockItemRepo};
