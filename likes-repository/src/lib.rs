//! # Likes Repository
//! This crate provides the storage interface for likes, its PostgreSQL and
//! in-memory implementations, and the [`LikesService`] that scopes every
//! toggle and query to the calling identity.
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;
pub mod service;

pub use config::{LikesServiceConfig, ToggleStrategy};
pub use errors::{LikesError, LikesRepositoryError};
pub use interfaces::LikesRepository;
pub use memory::InMemoryLikesRepository;
pub use postgres::PostgresLikesRepository;
pub use service::LikesService;
