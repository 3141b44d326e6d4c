// HTTP request handlers
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use likes_shared::types::{
    EntityId, EntityType, IsLikedResponse, LikeSummary, ToggleLikeRequest, ToggleLikeResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clients::{EntitySummary, prompts::description_prompt};
use crate::errors::ApiError;
use crate::identity::CallerIdentity;
use crate::server::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesQuery {
    pub entity_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDescriptionRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescription {
    pub entity_id: EntityId,
    pub entity_type: EntityType,
    pub name: String,
    pub description: String,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Mortypedia API is running")
}

/// Flips the caller's like on one entity.
pub async fn toggle_like(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    payload: Result<Json<ToggleLikeRequest>, JsonRejection>,
) -> Result<Json<ToggleLikeResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state
        .likes
        .toggle_like(&identity, &request.entity_type, request.entity_id)
        .await?;
    Ok(Json(response))
}

/// Lists the caller's likes, optionally filtered by `entityType`.
pub async fn get_likes(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    query: Result<Query<LikesQuery>, QueryRejection>,
) -> Result<Json<Vec<LikeSummary>>, ApiError> {
    let Query(query) = query?;
    let likes = state
        .likes
        .get_likes(&identity, query.entity_type.as_deref())
        .await?;
    Ok(Json(likes.iter().map(LikeSummary::from).collect()))
}

pub async fn is_liked(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    path: Result<Path<(String, EntityId)>, PathRejection>,
) -> Result<Json<IsLikedResponse>, ApiError> {
    let Path((entity_type, entity_id)) = path?;
    let liked = state
        .likes
        .is_liked(&identity, &entity_type, entity_id)
        .await?;
    Ok(Json(IsLikedResponse { liked }))
}

/// "My Likes": every liked entity resolved to its name and image.
pub async fn liked_entities(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
) -> Result<Json<Vec<EntitySummary>>, ApiError> {
    let likes = state.likes.get_likes(&identity, None).await?;
    let entities = views::liked_entities(&likes, state.metadata.as_ref()).await?;
    debug!(likes = likes.len(), resolved = entities.len(), "Resolved liked entities");
    Ok(Json(entities))
}

/// Generates prose for a caller-supplied prompt.
///
/// Any body that does not carry a non-empty `prompt` is answered with 400.
pub async fn generate_description(
    State(state): State<AppState>,
    payload: Option<Json<GenerateDescriptionRequest>>,
) -> Result<Json<String>, ApiError> {
    let prompt = payload
        .and_then(|Json(request)| request.prompt)
        .filter(|prompt| !prompt.is_empty())
        .ok_or(ApiError::MissingPrompt)?;

    let text = state.text_generator.generate(&prompt).await?;
    Ok(Json(text))
}

/// Generates a description for one dataset entity, prompting with its name.
pub async fn describe_entity(
    State(state): State<AppState>,
    path: Result<Path<(String, EntityId)>, PathRejection>,
) -> Result<Json<EntityDescription>, ApiError> {
    let Path((entity_type, entity_id)) = path?;
    let entity_type = entity_type.parse::<EntityType>()?;

    let entity = state
        .metadata
        .find(entity_type, entity_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{entity_type} {entity_id}")))?;

    let prompt = description_prompt(entity_type, &entity.name);
    let description = state.text_generator.generate(&prompt).await?;
    info!(entity_type = %entity_type, entity_id, "Generated entity description");

    Ok(Json(EntityDescription {
        entity_id,
        entity_type,
        name: entity.name,
        description,
    }))
}
