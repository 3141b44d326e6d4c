//! Clients for the collaborators the API consumes.
//!
//! - [`EntityMetadataSource`] resolves entity ids to display metadata through
//!   the Rick & Morty GraphQL API ([`RickAndMortyClient`]).
//! - [`TextGenerator`] produces descriptive prose through a chat-completions
//!   endpoint ([`OpenAiTextGenerator`]).
//!
//! Both come with mock implementations for tests and local development.
mod mock;
pub mod prompts;
mod rick_and_morty;
mod text_generation;

pub use mock::{MockEntityMetadataSource, MockTextGenerator};
pub use rick_and_morty::{
    DEFAULT_RICK_AND_MORTY_API_URL, EntityMetadataSource, EntitySummary, MetadataError,
    RickAndMortyClient,
};
pub use text_generation::{
    DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL, DisabledTextGenerator, OpenAiTextGenerator,
    TextGenerationError, TextGenerator,
};
