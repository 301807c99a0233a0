use std::sync::Arc;

use anyhow::Context;
use coach_server::{AppState, auth::JwtVerifier, config::ServerConfig, router};
use db::DBService;
use services::services::{claude_api::ClaudeApiClient, completion::CompletionService};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    utils::logging::init_tracing("info");

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let db = DBService::new(&config.database_url)
        .await
        .context("failed to open database")?;

    let completion: Option<Arc<dyn CompletionService>> = match config.anthropic_api_key.clone() {
        Some(key) => {
            let client = ClaudeApiClient::new(key, config.anthropic_model.clone())?;
            info!(model = client.model(), "Live task generation enabled");
            Some(Arc::new(client))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set, daily tasks will come from the static pool");
            None
        }
    };

    let verifier = JwtVerifier::new(&config.jwt_secret, &config.jwt_audience);
    let app = router(AppState::new(db, completion, verifier));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(address = %address, "Coach server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Coach server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
