//! Pure domain logic for the stockpile inventory service.
//!
//! No async, no I/O, no database access. The `db` and `api` crates build on
//! the types, error taxonomy, validation helpers, and bulk-file parser
//! defined here.

pub mod error;
pub mod import;
pub mod types;
pub mod validate;
