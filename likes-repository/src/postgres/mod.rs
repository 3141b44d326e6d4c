//! PostgreSQL implementation of the like store.
mod likes_repository;

pub use likes_repository::PostgresLikesRepository;
