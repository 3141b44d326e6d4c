//! In-memory like store for tests and local development.
//!
//! The `InMemoryLikesRepository` keeps likes in a `BTreeMap` keyed by the
//! full (user, entity type, entity id) tuple, so the uniqueness invariant
//! falls out of the map itself. It can also be flipped into an unavailable
//! state to exercise storage failure paths without a database.
//!
//! # Example
//!
//! ```ignore
//! use likes_repository::{InMemoryLikesRepository, LikesRepository};
//! use likes_shared::types::{EntityType, UserId};
//!
//! let repository = InMemoryLikesRepository::new();
//! let user = UserId::new("user-1").unwrap();
//! repository.insert(&user, EntityType::Character, 42).await?;
//! assert!(repository.exists(&user, EntityType::Character, 42).await?);
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use likes_shared::types::{EntityId, EntityType, Like, ToggleOutcome, UserId};
use tokio::sync::RwLock;

use crate::{LikesRepository, LikesRepositoryError};

type LikeKey = (UserId, EntityType, EntityId);

/// In-memory implementation of [`LikesRepository`].
#[derive(Default)]
pub struct InMemoryLikesRepository {
    /// Map of (user, entity type, entity id) -> liked_at
    likes: RwLock<BTreeMap<LikeKey, u64>>,
    unavailable: AtomicBool,
}

impl InMemoryLikesRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Total number of likes across all users.
    pub async fn len(&self) -> usize {
        self.likes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.likes.read().await.is_empty()
    }

    fn ensure_available(&self) -> Result<(), LikesRepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LikesRepositoryError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }

    fn key(user_id: &UserId, entity_type: EntityType, entity_id: EntityId) -> LikeKey {
        (user_id.clone(), entity_type, entity_id)
    }
}

#[async_trait]
impl LikesRepository for InMemoryLikesRepository {
    async fn exists(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<bool, LikesRepositoryError> {
        self.ensure_available()?;
        let likes = self.likes.read().await;
        Ok(likes.contains_key(&Self::key(user_id, entity_type, entity_id)))
    }

    async fn insert(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<(), LikesRepositoryError> {
        self.ensure_available()?;
        let mut likes = self.likes.write().await;
        let key = Self::key(user_id, entity_type, entity_id);
        if likes.contains_key(&key) {
            return Err(LikesRepositoryError::ConstraintViolation {
                entity_type,
                entity_id,
            });
        }
        likes.insert(key, Self::now());
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<bool, LikesRepositoryError> {
        self.ensure_available()?;
        let mut likes = self.likes.write().await;
        Ok(likes
            .remove(&Self::key(user_id, entity_type, entity_id))
            .is_some())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        entity_type: Option<EntityType>,
    ) -> Result<Vec<Like>, LikesRepositoryError> {
        self.ensure_available()?;
        let likes = self.likes.read().await;
        let mut result: Vec<Like> = likes
            .iter()
            .filter(|((owner, kind, _), _)| {
                owner == user_id && entity_type.is_none_or(|wanted| wanted == *kind)
            })
            .map(|((owner, kind, id), liked_at)| Like {
                user_id: owner.clone(),
                entity_type: *kind,
                entity_id: *id,
                liked_at: *liked_at,
            })
            .collect();

        result.sort_by_key(|like| (like.liked_at, like.entity_type, like.entity_id));
        Ok(result)
    }

    async fn toggle(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<ToggleOutcome, LikesRepositoryError> {
        self.ensure_available()?;
        // The write lock spans both the check and the mutation.
        let mut likes = self.likes.write().await;
        let key = Self::key(user_id, entity_type, entity_id);
        if likes.remove(&key).is_some() {
            Ok(ToggleOutcome::Unliked)
        } else {
            likes.insert(key, Self::now());
            Ok(ToggleOutcome::Liked)
        }
    }

    async fn check_tables_created(&self) -> Result<bool, LikesRepositoryError> {
        self.ensure_available()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(raw: &str) -> UserId {
        UserId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_exists() {
        let repository = InMemoryLikesRepository::new();
        let u1 = user("u1");

        assert!(!repository.exists(&u1, EntityType::Character, 42).await.unwrap());
        repository.insert(&u1, EntityType::Character, 42).await.unwrap();
        assert!(repository.exists(&u1, EntityType::Character, 42).await.unwrap());
        assert!(!repository.exists(&u1, EntityType::Episode, 42).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_constraint_violation() {
        let repository = InMemoryLikesRepository::new();
        let u1 = user("u1");

        repository.insert(&u1, EntityType::Location, 3).await.unwrap();
        let err = repository.insert(&u1, EntityType::Location, 3).await.unwrap_err();

        assert!(matches!(
            err,
            LikesRepositoryError::ConstraintViolation { entity_type: EntityType::Location, entity_id: 3 }
        ));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let repository = InMemoryLikesRepository::new();
        let u1 = user("u1");
        repository.insert(&u1, EntityType::Episode, 7).await.unwrap();

        let removed = repository.delete(&u1, EntityType::Episode, 8).await.unwrap();

        assert!(!removed);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_by_user_filters_owner_and_kind() {
        let repository = InMemoryLikesRepository::new();
        let u1 = user("u1");
        let u2 = user("u2");
        repository.insert(&u1, EntityType::Episode, 7).await.unwrap();
        repository.insert(&u1, EntityType::Location, 3).await.unwrap();
        repository.insert(&u2, EntityType::Episode, 9).await.unwrap();

        let all = repository.list_by_user(&u1, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|like| like.user_id == u1));

        let episodes = repository.list_by_user(&u1, Some(EntityType::Episode)).await.unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].entity_id, 7);
    }

    #[tokio::test]
    async fn test_toggle_flips_membership() {
        let repository = InMemoryLikesRepository::new();
        let u1 = user("u1");

        let first = repository.toggle(&u1, EntityType::Character, 1).await.unwrap();
        let second = repository.toggle(&u1, EntityType::Character, 1).await.unwrap();

        assert_eq!(first, ToggleOutcome::Liked);
        assert_eq!(second, ToggleOutcome::Unliked);
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let repository = InMemoryLikesRepository::new();
        let u1 = user("u1");
        repository.set_unavailable(true);

        assert!(repository.exists(&u1, EntityType::Character, 1).await.is_err());
        assert!(repository.toggle(&u1, EntityType::Character, 1).await.is_err());
        assert!(repository.check_tables_created().await.is_err());

        repository.set_unavailable(false);
        assert!(repository.check_tables_created().await.unwrap());
    }
}
