//! Mock collaborators for testing and local development.
//!
//! # Example
//!
//! ```ignore
//! use likes_shared::types::EntityType;
//! use mortypedia_api::clients::{MockEntityMetadataSource, MockTextGenerator};
//!
//! let metadata = MockEntityMetadataSource::new()
//!     .with_entity(EntityType::Character, 1, "Rick Sanchez")
//!     .with_entity(EntityType::Episode, 1, "Pilot");
//! let generator = MockTextGenerator::replying("A genius scientist.");
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use likes_shared::types::{EntityId, EntityType};
use tokio::sync::Mutex;

use super::rick_and_morty::{EntityMetadataSource, EntitySummary, MetadataError};
use super::text_generation::{TextGenerationError, TextGenerator};

/// Metadata source answering from a fixed table of entities.
#[derive(Default)]
pub struct MockEntityMetadataSource {
    entities: HashMap<(EntityType, EntityId), EntitySummary>,
    failing: bool,
}

impl MockEntityMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose every call fails as if the API were down.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Registers an entity; characters get a synthetic avatar url.
    pub fn with_entity(mut self, entity_type: EntityType, id: EntityId, name: &str) -> Self {
        let image = match entity_type {
            EntityType::Character => Some(format!("https://example.test/avatar/{id}.jpeg")),
            EntityType::Episode => Some("/episodes.webp".to_string()),
            EntityType::Location => Some("/locations.webp".to_string()),
        };
        self.entities.insert(
            (entity_type, id),
            EntitySummary {
                id,
                name: name.to_string(),
                entity_type,
                image,
            },
        );
        self
    }

    fn check(&self) -> Result<(), MetadataError> {
        if self.failing {
            return Err(MetadataError::GraphQl("mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityMetadataSource for MockEntityMetadataSource {
    async fn resolve(
        &self,
        entity_type: EntityType,
        ids: &[EntityId],
    ) -> Result<Vec<EntitySummary>, MetadataError> {
        self.check()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.entities.get(&(entity_type, *id)).cloned())
            .collect())
    }

    async fn find(
        &self,
        entity_type: EntityType,
        id: EntityId,
    ) -> Result<Option<EntitySummary>, MetadataError> {
        self.check()?;
        Ok(self.entities.get(&(entity_type, id)).cloned())
    }
}

/// Generator that replies with canned text and records the prompts it saw.
pub struct MockTextGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A generator whose every call fails upstream.
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        self.prompts.lock().await.push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| TextGenerationError::Upstream("mock failure".to_string()))
    }
}
