// Server module - HTTP server setup and routing
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::info;

pub use self::state::AppState;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/likes", get(handlers::get_likes))
        .route("/likes/toggle", post(handlers::toggle_like))
        .route("/likes/entities", get(handlers::liked_entities))
        .route("/likes/:entity_type/:entity_id", get(handlers::is_liked))
        .route("/generate-description", post(handlers::generate_description))
        .route(
            "/entities/:entity_type/:entity_id/description",
            post(handlers::describe_entity),
        )
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the server on the specified address until ctrl-c
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Server listening on {}", addr);
    info!("- Toggle endpoint: http://{}/likes/toggle", addr);
    info!("- Likes endpoint: http://{}/likes", addr);
    info!("- Description endpoint: http://{}/generate-description", addr);
    info!("- Health endpoint: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
