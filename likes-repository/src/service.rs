//! Likes service implementation.
//!
//! This module provides the toggle and query operations exposed to request
//! handlers. Each operation takes the caller's [`Identity`] explicitly,
//! rejects anonymous callers and unknown entity types before touching the
//! store, and scopes every store call to the caller's own user id.

use std::sync::Arc;

use likes_shared::types::{
    EntityId, EntityType, Identity, Like, ToggleLikeResponse, ToggleOutcome, UserId,
};
use tracing::{debug, info, warn};

use crate::config::{LikesServiceConfig, ToggleStrategy};
use crate::errors::LikesError;
use crate::interfaces::LikesRepository;

/// The main service for toggling and querying likes.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use likes_repository::{InMemoryLikesRepository, LikesService};
/// use likes_shared::types::Identity;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = LikesService::new(Arc::new(InMemoryLikesRepository::new()));
/// let caller = Identity::user("user-1");
///
/// service.toggle_like(&caller, "character", 42).await?;
/// assert!(service.is_liked(&caller, "character", 42).await?);
/// # Ok(())
/// # }
/// ```
pub struct LikesService {
    repository: Arc<dyn LikesRepository>,
    config: LikesServiceConfig,
}

impl LikesService {
    /// Create a new LikesService with the default (atomic) configuration.
    pub fn new(repository: Arc<dyn LikesRepository>) -> Self {
        Self {
            repository,
            config: LikesServiceConfig::default(),
        }
    }

    /// Create a new LikesService with custom configuration.
    pub fn with_config(repository: Arc<dyn LikesRepository>, config: LikesServiceConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &LikesServiceConfig {
        &self.config
    }

    fn require_user(identity: &Identity) -> Result<&UserId, LikesError> {
        identity.user_id().ok_or(LikesError::AuthenticationRequired)
    }

    fn parse_entity_type(raw: &str) -> Result<EntityType, LikesError> {
        raw.parse::<EntityType>()
            .map_err(|_| LikesError::invalid_entity_type(raw))
    }

    /// Flip the liked state of one entity for the caller.
    ///
    /// # Arguments
    ///
    /// * `identity` - The caller; must be authenticated
    /// * `entity_type` - One of `character`, `episode`, `location`
    /// * `entity_id` - Id in the external dataset (not existence-checked)
    ///
    /// # Returns
    ///
    /// * `Ok(ToggleLikeResponse { success: true })` - Exactly one row was created or destroyed
    /// * `Err(LikesError::AuthenticationRequired)` - Anonymous caller
    /// * `Err(LikesError::InvalidEntityType)` - Entity type outside the closed set
    /// * `Err(LikesError::ConstraintViolation)` - Lost a check-then-act race
    /// * `Err(LikesError::StoreUnavailable)` - The store failed
    pub async fn toggle_like(
        &self,
        identity: &Identity,
        entity_type: &str,
        entity_id: EntityId,
    ) -> Result<ToggleLikeResponse, LikesError> {
        let user_id = Self::require_user(identity)?;
        let entity_type = Self::parse_entity_type(entity_type)?;

        self.toggle(user_id, entity_type, entity_id).await?;
        Ok(ToggleLikeResponse { success: true })
    }

    /// Flip the liked state and report which mutation happened.
    pub async fn toggle(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<ToggleOutcome, LikesError> {
        let outcome = match self.config.toggle_strategy {
            ToggleStrategy::Atomic => {
                self.repository
                    .toggle(user_id, entity_type, entity_id)
                    .await?
            }
            ToggleStrategy::CheckThenAct => {
                self.check_then_act(user_id, entity_type, entity_id).await?
            }
        };

        info!(
            user_id = %user_id,
            entity_type = %entity_type,
            entity_id,
            liked = outcome.is_liked(),
            "Toggled like"
        );
        Ok(outcome)
    }

    async fn check_then_act(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<ToggleOutcome, LikesError> {
        let exists = self
            .repository
            .exists(user_id, entity_type, entity_id)
            .await?;

        if exists {
            self.repository
                .delete(user_id, entity_type, entity_id)
                .await?;
            return Ok(ToggleOutcome::Unliked);
        }

        self.repository
            .insert(user_id, entity_type, entity_id)
            .await
            .map_err(|e| {
                let err = LikesError::from(e);
                if matches!(err, LikesError::ConstraintViolation(_)) {
                    warn!(
                        user_id = %user_id,
                        entity_type = %entity_type,
                        entity_id,
                        "Concurrent toggle inserted the same like"
                    );
                }
                err
            })?;
        Ok(ToggleOutcome::Liked)
    }

    /// Whether the caller has liked the given entity.
    pub async fn is_liked(
        &self,
        identity: &Identity,
        entity_type: &str,
        entity_id: EntityId,
    ) -> Result<bool, LikesError> {
        let user_id = Self::require_user(identity)?;
        let entity_type = Self::parse_entity_type(entity_type)?;

        let liked = self
            .repository
            .exists(user_id, entity_type, entity_id)
            .await?;
        Ok(liked)
    }

    /// All of the caller's likes, optionally restricted to one entity type.
    pub async fn get_likes(
        &self,
        identity: &Identity,
        entity_type: Option<&str>,
    ) -> Result<Vec<Like>, LikesError> {
        let user_id = Self::require_user(identity)?;
        let entity_type = entity_type.map(Self::parse_entity_type).transpose()?;

        let likes = self.repository.list_by_user(user_id, entity_type).await?;
        debug!(user_id = %user_id, count = likes.len(), "Fetched likes");
        Ok(likes)
    }
}
