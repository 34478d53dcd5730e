use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use suggest::{LlmProvider, SuggestionOrchestrator};
use suggest_server::{app, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "suggest_server=info,suggest=info,llm=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        backend = config.client.backend.display_name(),
        endpoint = %config.client.endpoint,
        model = %config.client.model,
        timeout_secs = config.client.timeout.as_secs(),
        "AI backend configured"
    );

    let provider = LlmProvider::from_config(config.client.clone())?;
    let orchestrator = SuggestionOrchestrator::new(Arc::new(provider));
    let app = app(AppState::new(orchestrator, config.min_description_length));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
