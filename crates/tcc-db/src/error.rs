//! Database error types for tcc-db.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Lookup by id (or other key) found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A unique field is already taken.
    #[error("{0}")]
    Conflict(String),

    /// A referenced row does not exist, e.g. an unknown `branchId`.
    #[error("{0}")]
    InvalidReference(String),

    /// The row exists but is in the wrong state for the operation,
    /// e.g. dispatching a consignment that is not pending.
    #[error("{0}")]
    InvalidState(String),

    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
