//! palaver service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use pserve::{AppState, ServeConfig, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServeConfig::from_env()?;

    tracing::info!(
        model = %config.model,
        max_turns = config.max_turns,
        "palaver v{}",
        env!("CARGO_PKG_VERSION")
    );

    let generator = Arc::new(palaver::gemini_generator(config.api_key, config.model));
    let store = palaver::in_memory_store(config.system_prompt, config.max_turns);
    let chat = palaver::chat_service_with_store(generator, store);

    // permissive by design for the dev frontend; tighten in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = build_router(Arc::new(AppState { chat })).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
