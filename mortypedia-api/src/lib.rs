//! # Mortypedia API
//! HTTP surface for per-user likes over the Rick & Morty dataset, the
//! "My Likes" view and generated entity descriptions.
pub mod clients;
pub mod config;
pub mod errors;
pub mod identity;
pub mod server;
pub mod views;

pub use config::{Dependencies, Settings};
pub use errors::{ApiError, StartupError};
