//! This module defines and re-exports the interfaces for the likes repository.
mod likes;

pub use likes::LikesRepository;
