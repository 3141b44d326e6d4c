use thiserror::Error;

use crate::errors::LikesRepositoryError;

/// Errors surfaced by the [`LikesService`](crate::LikesService).
///
/// Every failure is propagated to the caller; nothing is retried or
/// swallowed. The variants are distinct so the view layer can decide what
/// to show for each.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LikesError {
    /// The operation was invoked without a resolved identity.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The entity type is not one of character, episode or location.
    #[error("Invalid entity type: {0:?}")]
    InvalidEntityType(String),

    /// An insert collided with an existing like for the same tuple.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The persistence layer could not serve the request.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl LikesError {
    /// Create an invalid entity type error.
    pub fn invalid_entity_type(value: impl Into<String>) -> Self {
        Self::InvalidEntityType(value.into())
    }

    /// Create a store unavailable error.
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }
}

impl From<LikesRepositoryError> for LikesError {
    fn from(err: LikesRepositoryError) -> Self {
        if err.is_unique_violation() {
            return Self::ConstraintViolation(err.to_string());
        }
        Self::StoreUnavailable(err.to_string())
    }
}
