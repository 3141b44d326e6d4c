//! # Likes Shared
//! This crate defines the data structures shared across the likes ecosystem:
//! entity kinds, caller identities, persisted likes and the request/response
//! shapes of the toggle and query operations.
pub mod types;
