//! Read models composed from likes and the external dataset.
use likes_shared::types::{EntityId, EntityType, Like};

use crate::clients::{EntityMetadataSource, EntitySummary, MetadataError};

fn ids_of_kind(likes: &[Like], entity_type: EntityType) -> Vec<EntityId> {
    likes
        .iter()
        .filter(|like| like.entity_type == entity_type)
        .map(|like| like.entity_id)
        .collect()
}

async fn resolve_kind(
    source: &dyn EntityMetadataSource,
    entity_type: EntityType,
    ids: &[EntityId],
) -> Result<Vec<EntitySummary>, MetadataError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    source.resolve(entity_type, ids).await
}

/// Builds the "My Likes" view: the caller's liked ids resolved to display
/// metadata, characters first, then episodes, then locations.
///
/// The three kinds are fetched concurrently. Liked ids the dataset does not
/// know are left out.
pub async fn liked_entities(
    likes: &[Like],
    source: &dyn EntityMetadataSource,
) -> Result<Vec<EntitySummary>, MetadataError> {
    let character_ids = ids_of_kind(likes, EntityType::Character);
    let episode_ids = ids_of_kind(likes, EntityType::Episode);
    let location_ids = ids_of_kind(likes, EntityType::Location);

    let (characters, episodes, locations) = tokio::try_join!(
        resolve_kind(source, EntityType::Character, &character_ids),
        resolve_kind(source, EntityType::Episode, &episode_ids),
        resolve_kind(source, EntityType::Location, &location_ids),
    )?;

    Ok(characters
        .into_iter()
        .chain(episodes)
        .chain(locations)
        .collect())
}
