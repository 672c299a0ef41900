use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stockpile_core::error::CoreError;
use stockpile_db::repositories::LedgerError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`LedgerError`] for domain failures and adds
/// HTTP-specific variants. Implements [`IntoResponse`] so every handler
/// produces the same JSON error shape: `{ "error": ..., "code": ... }` for a
/// single message, `{ "errors": [...], "code": ... }` for a deduplicated
/// validation set.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `stockpile-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A ledger failure from the repository layer.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Boundary validation failed; carries the set of distinct messages.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status + code + one message or a message set.
enum ErrorBody {
    Single(StatusCode, &'static str, String),
    Many(StatusCode, &'static str, Vec<String>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => ErrorBody::Single(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    ErrorBody::Single(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Malformed(msgs) => {
                    ErrorBody::Many(StatusCode::BAD_REQUEST, "MALFORMED_DATA", msgs.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal_body()
                }
            },

            // --- LedgerError variants ---
            AppError::Ledger(ledger) => match ledger {
                LedgerError::KeyNotFound { .. } | LedgerError::IdNotFound { .. } => {
                    ErrorBody::Single(StatusCode::NOT_FOUND, "NOT_FOUND", ledger.to_string())
                }
                LedgerError::InsufficientQuantity { .. } => ErrorBody::Single(
                    StatusCode::BAD_REQUEST,
                    "INSUFFICIENT_QUANTITY",
                    ledger.to_string(),
                ),
                LedgerError::KeyConflict { .. } => ErrorBody::Single(
                    StatusCode::BAD_REQUEST,
                    "KEY_CONFLICT",
                    ledger.to_string(),
                ),
                LedgerError::Db(err) => classify_sqlx_error(err),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::Validation(msgs) => {
                ErrorBody::Many(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msgs.clone())
            }
            AppError::BadRequest(msg) => {
                ErrorBody::Single(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_body()
            }
        };

        match body {
            ErrorBody::Single(status, code, message) => (
                status,
                axum::Json(json!({ "error": message, "code": code })),
            )
                .into_response(),
            ErrorBody::Many(status, code, messages) => (
                status,
                axum::Json(json!({ "errors": messages, "code": code })),
            )
                .into_response(),
        }
    }
}

fn internal_body() -> ErrorBody {
    ErrorBody::Single(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 409. For stock items this is the fallback path for partial-update
///   renames that land on an occupied key.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorBody {
    match err {
        sqlx::Error::RowNotFound => ErrorBody::Single(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return ErrorBody::Single(
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal_body()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_body()
        }
    }
}
