//! This module defines the `LikesRepository` trait, the interface to the
//! persistent relation of (user, entity type, entity id) tuples.
use likes_shared::types::{EntityId, EntityType, Like, ToggleOutcome, UserId};

use crate::errors::LikesRepositoryError;

/// A trait that defines the interface for interacting with the like store.
///
/// Every method takes the owning `UserId` explicitly and only ever touches
/// rows owned by that user. Implementations must enforce that at most one
/// row exists per (user, entity type, entity id).
#[async_trait::async_trait]
pub trait LikesRepository: Send + Sync {
    /// Returns true if the user has liked the entity. No side effects.
    async fn exists(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<bool, LikesRepositoryError>;

    /// Inserts a like.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The row was created
    /// * `Err(LikesRepositoryError::ConstraintViolation)` - A matching row already exists
    /// * `Err(LikesRepositoryError)` - Any other storage failure
    async fn insert(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<(), LikesRepositoryError>;

    /// Deletes a like if present. Deleting an absent like is a no-op.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A row was removed
    /// * `Ok(false)` - No matching row existed
    async fn delete(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<bool, LikesRepositoryError>;

    /// Lists the likes of a user, optionally restricted to one entity type.
    ///
    /// Results are ordered by creation time, then entity type, then entity id.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        entity_type: Option<EntityType>,
    ) -> Result<Vec<Like>, LikesRepositoryError>;

    /// Flips the liked state of a tuple as one atomic operation.
    ///
    /// Deletes the row if it exists, inserts it otherwise. Concurrent calls
    /// on the same tuple never surface a uniqueness error.
    async fn toggle(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<ToggleOutcome, LikesRepositoryError>;

    /// Checks if the backing tables are created.
    async fn check_tables_created(&self) -> Result<bool, LikesRepositoryError>;
}
