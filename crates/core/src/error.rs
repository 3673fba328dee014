//! Domain-level error type shared across the workspace.

/// Errors produced by domain logic in this crate.
///
/// The API layer maps these onto HTTP statuses; see `dreambox-api`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed validation.
    #[error("{0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// An invariant was violated or an internal step failed.
    #[error("{0}")]
    Internal(String),
}
