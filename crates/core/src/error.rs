use crate::types::DbId;

/// Domain-level error taxonomy shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Bulk-import content could not be parsed or violates row constraints.
    /// Carries the deduplicated set of row-level messages.
    #[error("Malformed data: {}", .0.join("; "))]
    Malformed(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}
