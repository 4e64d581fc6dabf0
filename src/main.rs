//! Agent Chat - HTTP gateway entry point.
//!
//! Starts the server that exposes `POST /chat`.

use agent_chat::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Provider keys may live in a local .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        "Loaded configuration: groq_key={} openai_key={} tavily_key={} max_iterations={}",
        config.groq.api_key.is_some(),
        config.openai.api_key.is_some(),
        config.search.tavily_api_key.is_some(),
        config.max_iterations
    );

    api::serve(config).await?;

    Ok(())
}
