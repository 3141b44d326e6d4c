//! Configuration for the Mortypedia API.
//! Reads settings from environment variables and wires dependencies.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{OpenAiSettings, Settings, create_cors_layer};
