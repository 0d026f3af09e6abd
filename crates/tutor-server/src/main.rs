use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tutor_llm::HuggingFaceClient;
use tutor_server::{build_app, ServerConfig, TutorState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;

    if !config.hugging_face.startup_probe {
        warn!("Startup probe disabled: endpoint reachability is not verified");
    }

    let client = HuggingFaceClient::connect(config.hugging_face.clone())
        .await
        .context("Failed to initialize the LLM")?;

    info!(
        "Tutor ready: model={}, strategy={}, timeout={} ms",
        client.model(),
        config.strategy,
        config.timeout.as_millis()
    );

    let state = Arc::new(TutorState::new(
        Arc::new(client),
        config.persona,
        config.strategy,
        config.timeout,
    ));

    let app = build_app(state, config.cors.layer());

    info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
