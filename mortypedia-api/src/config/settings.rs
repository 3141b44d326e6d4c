//! Environment-driven settings.
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::{HeaderValue, Method, header};
use likes_repository::ToggleStrategy;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::clients::{DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL, DEFAULT_RICK_AND_MORTY_API_URL};
use crate::errors::StartupError;
use crate::identity::USER_ID_HEADER;

/// Default bind address.
const DEFAULT_SERVER_HOST: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
const DEFAULT_SERVER_PORT: u16 = 8080;

/// Origins allowed by default (Next.js and Vite dev servers).
const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Credentials and model for the chat-completions API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

/// All runtime settings of the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub server_addr: SocketAddr,
    pub rick_and_morty_api_url: String,
    /// `None` when `OPENAI_API_KEY` is unset; descriptions are then disabled.
    pub openai: Option<OpenAiSettings>,
    pub toggle_strategy: ToggleStrategy,
    pub run_migrations: bool,
    pub cors_allowed_origins: Vec<String>,
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(key: &str, default: bool) -> bool {
    match non_empty_var(key).map(|v| v.to_lowercase()) {
        Some(v) if v == "true" || v == "1" => true,
        Some(v) if v == "false" || v == "0" => false,
        Some(v) => {
            warn!(key, value = %v, "Invalid boolean, using default");
            default
        }
        None => default,
    }
}

impl Settings {
    /// Reads settings from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `SERVER_HOST`: bind address (default: 127.0.0.1)
    /// - `SERVER_PORT`: bind port (default: 8080)
    /// - `RICK_AND_MORTY_API_URL`: GraphQL endpoint (default: https://rickandmortyapi.com/graphql)
    /// - `OPENAI_API_KEY`: enables generated descriptions when set
    /// - `OPENAI_API_URL`: chat-completions endpoint (default: https://api.openai.com/v1/chat/completions)
    /// - `OPENAI_MODEL`: model name (default: gpt-3.5-turbo-16k-0613)
    /// - `TOGGLE_STRATEGY`: "atomic" or "check-then-act" (default: atomic)
    /// - `RUN_MIGRATIONS`: apply migrations on startup (default: true)
    /// - `CORS_ALLOWED_ORIGINS`: comma separated origins (default: local dev servers)
    pub fn from_env() -> Result<Self, StartupError> {
        let database_url = non_empty_var("DATABASE_URL")
            .ok_or_else(|| StartupError::config("DATABASE_URL must be set"))?;

        let host = match non_empty_var("SERVER_HOST") {
            Some(raw) => raw
                .parse::<IpAddr>()
                .map_err(|e| StartupError::config(format!("invalid SERVER_HOST {raw:?}: {e}")))?,
            None => DEFAULT_SERVER_HOST,
        };
        let port = match non_empty_var("SERVER_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| StartupError::config(format!("invalid SERVER_PORT {raw:?}: {e}")))?,
            None => DEFAULT_SERVER_PORT,
        };

        let rick_and_morty_api_url = non_empty_var("RICK_AND_MORTY_API_URL")
            .unwrap_or_else(|| DEFAULT_RICK_AND_MORTY_API_URL.to_string());

        let openai = non_empty_var("OPENAI_API_KEY").map(|api_key| OpenAiSettings {
            api_key,
            api_url: non_empty_var("OPENAI_API_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),
            model: non_empty_var("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        });

        let toggle_strategy = match non_empty_var("TOGGLE_STRATEGY") {
            Some(raw) => raw.parse::<ToggleStrategy>().map_err(StartupError::config)?,
            None => ToggleStrategy::default(),
        };

        let cors_allowed_origins = match non_empty_var("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Settings {
            database_url,
            server_addr: SocketAddr::new(host, port),
            rick_and_morty_api_url,
            openai,
            toggle_strategy,
            run_migrations: parse_bool("RUN_MIGRATIONS", true),
            cors_allowed_origins,
        })
    }
}

/// Creates the CORS layer for the configured origins.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::HeaderName::from_static(USER_ID_HEADER)])
}
