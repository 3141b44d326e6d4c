use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Payload of a toggle-like call.
///
/// `entity_type` stays a raw string here so that values outside the closed
/// set reach the service and are rejected as an invalid entity type rather
/// than as a malformed payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub entity_id: EntityId,
    pub entity_type: String,
}

/// Result of a toggle-like call. Callers re-query to learn the new state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleLikeResponse {
    pub success: bool,
}

/// Which row mutation a toggle performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The tuple was absent and a row was inserted.
    Liked,
    /// The tuple was present and its row was deleted.
    Unliked,
}

impl ToggleOutcome {
    pub fn is_liked(&self) -> bool {
        matches!(self, ToggleOutcome::Liked)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IsLikedResponse {
    pub liked: bool,
}
