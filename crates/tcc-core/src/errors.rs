//! Cross-cutting error types for TCC.
//!
//! Domain-specific errors (`DatabaseError`, `AuthError`, ...) live in their
//! respective crates. The HTTP layer converges them into its own `ApiError`.

use thiserror::Error;

/// Errors that can be raised by any TCC crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, references, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
