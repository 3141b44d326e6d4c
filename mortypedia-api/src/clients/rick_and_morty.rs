//! Client for the public Rick & Morty GraphQL API.
//!
//! Only the lookups the likes views need are implemented: batch resolution
//! of ids to names and images, and single-entity name lookups.

use async_trait::async_trait;
use likes_shared::types::{EntityId, EntityType};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Default endpoint of the public dataset.
pub const DEFAULT_RICK_AND_MORTY_API_URL: &str = "https://rickandmortyapi.com/graphql";

/// Placeholder images for kinds the dataset has no artwork for.
const EPISODE_IMAGE: &str = "/episodes.webp";
const LOCATION_IMAGE: &str = "/locations.webp";

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("graphql error: {0}")]
    GraphQl(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Display metadata for one entity of the dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    pub id: EntityId,
    pub name: String,
    pub entity_type: EntityType,
    pub image: Option<String>,
}

/// Trait for resolving entity ids against the external dataset.
#[async_trait]
pub trait EntityMetadataSource: Send + Sync {
    /// Resolves ids of one kind to display metadata.
    ///
    /// Ids unknown to the dataset are silently absent from the result.
    async fn resolve(
        &self,
        entity_type: EntityType,
        ids: &[EntityId],
    ) -> Result<Vec<EntitySummary>, MetadataError>;

    /// Looks up one entity, returning `None` if the dataset does not know it.
    async fn find(
        &self,
        entity_type: EntityType,
        id: EntityId,
    ) -> Result<Option<EntitySummary>, MetadataError>;
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Map<String, Value>>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

/// The dataset returns ids as strings.
#[derive(Debug, Deserialize)]
struct RawEntity {
    id: String,
    name: String,
    image: Option<String>,
}

fn batch_field(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Character => "charactersByIds",
        EntityType::Episode => "episodesByIds",
        EntityType::Location => "locationsByIds",
    }
}

fn batch_query(entity_type: EntityType) -> String {
    let image = match entity_type {
        EntityType::Character => " image",
        EntityType::Episode | EntityType::Location => "",
    };
    format!(
        "query LikedEntities($ids: [ID!]!) {{ {}(ids: $ids) {{ id name{} }} }}",
        batch_field(entity_type),
        image
    )
}

fn single_query(entity_type: EntityType) -> String {
    let image = match entity_type {
        EntityType::Character => " image",
        EntityType::Episode | EntityType::Location => "",
    };
    format!(
        "query Entity($id: ID!) {{ {}(id: $id) {{ id name{} }} }}",
        entity_type.as_str(),
        image
    )
}

fn to_summary(entity_type: EntityType, raw: RawEntity) -> Result<EntitySummary, MetadataError> {
    let id = raw
        .id
        .parse::<EntityId>()
        .map_err(|_| MetadataError::Parse(format!("non-numeric id {:?}", raw.id)))?;
    let image = match entity_type {
        EntityType::Character => raw.image,
        EntityType::Episode => Some(EPISODE_IMAGE.to_string()),
        EntityType::Location => Some(LOCATION_IMAGE.to_string()),
    };
    Ok(EntitySummary {
        id,
        name: raw.name,
        entity_type,
        image,
    })
}

/// Pulls `field` out of a GraphQL response body, failing on reported errors.
fn take_field(response: GraphQlResponse, field: &str) -> Result<Value, MetadataError> {
    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(MetadataError::GraphQl(messages.join("; ")));
    }
    let mut data = response
        .data
        .ok_or_else(|| MetadataError::Parse("response has no data".to_string()))?;
    Ok(data.remove(field).unwrap_or(Value::Null))
}

fn parse_batch(
    entity_type: EntityType,
    response: GraphQlResponse,
) -> Result<Vec<EntitySummary>, MetadataError> {
    let value = take_field(response, batch_field(entity_type))?;
    // Unknown ids come back as nulls inside the list.
    let raw: Vec<Option<RawEntity>> = match value {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other).map_err(|e| MetadataError::Parse(e.to_string()))?,
    };
    raw.into_iter()
        .flatten()
        .map(|entity| to_summary(entity_type, entity))
        .collect()
}

fn parse_single(
    entity_type: EntityType,
    response: GraphQlResponse,
) -> Result<Option<EntitySummary>, MetadataError> {
    let value = take_field(response, entity_type.as_str())?;
    let raw: Option<RawEntity> =
        serde_json::from_value(value).map_err(|e| MetadataError::Parse(e.to_string()))?;
    raw.map(|entity| to_summary(entity_type, entity)).transpose()
}

/// Production client that POSTs GraphQL queries to the dataset endpoint.
pub struct RickAndMortyClient {
    url: String,
    client: ReqwestClient,
}

impl RickAndMortyClient {
    pub fn new(url: &str) -> Self {
        RickAndMortyClient {
            url: url.to_string(),
            client: ReqwestClient::new(),
        }
    }

    async fn execute(&self, query: String, variables: Value) -> Result<GraphQlResponse, MetadataError> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<GraphQlResponse>().await?)
    }
}

#[async_trait]
impl EntityMetadataSource for RickAndMortyClient {
    async fn resolve(
        &self,
        entity_type: EntityType,
        ids: &[EntityId],
    ) -> Result<Vec<EntitySummary>, MetadataError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let response = self
            .execute(batch_query(entity_type), json!({ "ids": ids }))
            .await?;
        let entities = parse_batch(entity_type, response)?;

        if entities.len() < ids.len() {
            warn!(
                entity_type = %entity_type,
                requested = ids.len(),
                resolved = entities.len(),
                "Some liked ids are unknown to the dataset"
            );
        }
        debug!(entity_type = %entity_type, count = entities.len(), "Resolved entities");
        Ok(entities)
    }

    async fn find(
        &self,
        entity_type: EntityType,
        id: EntityId,
    ) -> Result<Option<EntitySummary>, MetadataError> {
        let response = self
            .execute(single_query(entity_type), json!({ "id": id.to_string() }))
            .await?;
        parse_single(entity_type, response)
    }
}
