use numbers_gateway::config::GatewayConfig;
use numbers_gateway::router::create_router;
use numbers_gateway::state::AppState;
use numbers_gateway::telemetry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    telemetry::init_tracing();

    tracing::info!("Starting numbers gateway");

    let config = GatewayConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");
    if config.provider_token.is_none() {
        tracing::warn!("NUMBERS_PROVIDER_TOKEN not set, provider requests are unauthenticated");
    }

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(config.listen_addr).await?;

    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
