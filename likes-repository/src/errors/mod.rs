//! Error types for the likes repository and service.
//! The repository error describes storage failures; the service error is the
//! taxonomy surfaced to callers.
mod likes_repository;
mod likes_service;

pub use likes_repository::LikesRepositoryError;
pub use likes_service::LikesError;
