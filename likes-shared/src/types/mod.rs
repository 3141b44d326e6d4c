mod entity_type;
mod identity;
mod like;
mod toggle;

pub use entity_type::{EntityType, InvalidEntityType};
pub use identity::{Identity, InvalidUserId, UserId};
pub use like::{EntityId, Like, LikeSummary};
pub use toggle::{IsLikedResponse, ToggleLikeRequest, ToggleLikeResponse, ToggleOutcome};
