use serde::{Deserialize, Serialize};

use crate::types::{EntityType, UserId};

/// Identifier of an entity in the external Rick & Morty dataset.
///
/// Existence is never checked against the dataset.
pub type EntityId = i32;

/// A persisted record that a user has marked an entity as a favorite.
///
/// The triple (`user_id`, `entity_type`, `entity_id`) is unique. A row
/// existing is the only meaning of "liked"; unliking deletes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub user_id: UserId,
    pub entity_type: EntityType,
    pub entity_id: EntityId,
    /// Unix timestamp (seconds) of when the like was created.
    pub liked_at: u64,
}

/// The caller-facing projection of a [`Like`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub struct LikeSummary {
    pub entity_id: EntityId,
    pub entity_type: EntityType,
}

impl From<&Like> for LikeSummary {
    fn from(like: &Like) -> Self {
        Self {
            entity_id: like.entity_id,
            entity_type: like.entity_type,
        }
    }
}
