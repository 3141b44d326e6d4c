use likes_shared::types::{EntityId, EntityType};
use thiserror::Error;

/// Represents errors that can occur within the likes repository.
///
/// Wraps SQLx errors from database operations and the decoding failures of
/// rows that do not map back onto the domain types.
#[derive(Debug, Error)]
pub enum LikesRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Like already exists: ({entity_type}, {entity_id})")]
    ConstraintViolation {
        entity_type: EntityType,
        entity_id: EntityId,
    },

    #[error("Invalid entity type: {0}")]
    InvalidEntityType(String),

    #[error("Invalid user id: {0:?}")]
    InvalidUserId(String),
}

impl LikesRepositoryError {
    /// Returns true when the underlying database rejected a write on the
    /// uniqueness of the like tuple.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            LikesRepositoryError::ConstraintViolation { .. } => true,
            LikesRepositoryError::DatabaseError(sqlx::Error::Database(db)) => {
                db.is_unique_violation()
            }
            _ => false,
        }
    }
}
