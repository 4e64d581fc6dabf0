//! Router construction and server startup.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::chat;
use super::types::HealthResponse;
use crate::agent::AgentFactory;
use crate::config::Config;
use crate::providers::ProviderRegistry;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Shared, read-only state for all handlers.
pub struct AppState {
    pub config: Arc<Config>,
    pub agents: AgentFactory,
}

impl AppState {
    /// State wired to the real providers described by `config`.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        let agents = AgentFactory::new(
            Arc::new(ProviderRegistry::new(config.clone())),
            config.search.clone(),
            config.max_iterations,
        );
        Self { config, agents }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/chat", post(chat::chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until the process exits.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: state
            .config
            .configured_providers()
            .into_iter()
            .map(|p| p.as_str().to_string())
            .collect(),
    })
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
