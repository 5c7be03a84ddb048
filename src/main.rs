use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use quiz_backend::{
    config::Config,
    extraction::ExtractorRegistry,
    routes::create_router,
    storage::LocalUploadStore,
    utils::init_logger,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_logger(&config.logging);
    info!("Configuration loaded: {:?}", config.server);

    // Upload directory is created once, here
    let store = LocalUploadStore::new(&config.storage.upload_dir)?;

    // Create shared state
    let state = AppState::new(
        config.clone(),
        Arc::new(store),
        Arc::new(ExtractorRegistry::default()),
    );

    // Create router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
