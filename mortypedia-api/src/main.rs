//! Mortypedia API entry point.
//!
//! Loads settings from the environment, wires the likes store and external
//! clients, and serves HTTP until ctrl-c.

use dotenv::dotenv;
use mortypedia_api::{Dependencies, Settings, StartupError, config::create_cors_layer, server};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mortypedia_api=info,likes_repository=info"));

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "mortypedia-api",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let settings = Settings::from_env()?;

    let deps = match Dependencies::new(&settings).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let app = server::create_app(
        deps.into_state(),
        create_cors_layer(&settings.cors_allowed_origins),
    );

    if let Err(e) = server::run_server(app, settings.server_addr).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }

    info!("Mortypedia API stopped");
    Ok(())
}
