use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use stage_configurator_lib::state::settings::ConfiguratorSettings;
use tower_http::cors::CorsLayer;

mod ai;
mod heuristic;
mod routes;

const DEFAULT_ADDR: &str = "0.0.0.0:3001";

#[derive(Clone)]
pub struct AppState {
    pub ai_api_key: Option<String>,
    pub settings: Arc<ConfiguratorSettings>,
    pub http: reqwest::Client,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/templates", get(routes::templates))
        .route("/api/quote", post(routes::quote))
        .route("/api/detect", post(routes::detect))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,stage_configurator_lib=info".into()),
        )
        .init();

    let state = AppState {
        ai_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
        settings: Arc::new(ConfiguratorSettings::load()),
        http: reqwest::Client::new(),
    };
    if state.ai_api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY not set, image analysis uses the local heuristic only");
    }

    let addr = std::env::var("STAGE_SERVER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("Server running on http://{addr}");
    if let Err(e) = axum::serve(listener, router(state)).await {
        tracing::error!("Server error: {e}");
    }
}
