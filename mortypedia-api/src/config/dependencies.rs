use std::sync::Arc;

use likes_repository::{LikesRepository, LikesService, LikesServiceConfig, PostgresLikesRepository};
use tracing::{info, warn};

use crate::clients::{
    DisabledTextGenerator, EntityMetadataSource, OpenAiTextGenerator, RickAndMortyClient,
    TextGenerator,
};
use crate::config::Settings;
use crate::errors::StartupError;
use crate::server::AppState;

/// `Dependencies` holds the wired components the HTTP server runs on.
///
/// It owns the likes service backed by PostgreSQL, the dataset client
/// resolving entity metadata, and the text generator used for descriptions.
pub struct Dependencies {
    pub likes: Arc<LikesService>,
    pub metadata: Arc<dyn EntityMetadataSource>,
    pub text_generator: Arc<dyn TextGenerator>,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance from `settings`.
    ///
    /// Connects to the database, applies migrations when enabled and refuses
    /// to start if the likes table is still missing afterwards.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or a
    /// `StartupError` if any dependency fails to initialize.
    pub async fn new(settings: &Settings) -> Result<Self, StartupError> {
        let repository = PostgresLikesRepository::connect(&settings.database_url).await?;

        if settings.run_migrations {
            repository.run_migrations().await?;
            info!("Database migrations applied");
        }
        if !repository.check_tables_created().await? {
            return Err(StartupError::SchemaMissing);
        }

        let likes = LikesService::with_config(
            Arc::new(repository),
            LikesServiceConfig::with_toggle_strategy(settings.toggle_strategy),
        );
        info!(toggle_strategy = %likes.config().toggle_strategy, "Likes service ready");

        let metadata = Arc::new(RickAndMortyClient::new(&settings.rick_and_morty_api_url));

        let text_generator: Arc<dyn TextGenerator> = match &settings.openai {
            Some(openai) => Arc::new(OpenAiTextGenerator::new(
                &openai.api_url,
                &openai.api_key,
                &openai.model,
            )),
            None => {
                warn!("OPENAI_API_KEY is not set, description generation is disabled");
                Arc::new(DisabledTextGenerator)
            }
        };

        Ok(Dependencies {
            likes: Arc::new(likes),
            metadata,
            text_generator,
        })
    }

    /// Consumes the dependencies into the shared request state.
    pub fn into_state(self) -> AppState {
        AppState {
            likes: self.likes,
            metadata: self.metadata,
            text_generator: self.text_generator,
        }
    }
}
