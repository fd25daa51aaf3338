use std::sync::Arc;
use subsage_web::{AppConfig, AppState, Controller, FilePreferenceStore, HttpApiClient, router};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    if let Some(parent) = config
        .preferences_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).await?;
    }

    let store = FilePreferenceStore::load(config.preferences_path.clone()).await;
    info!("preferences at {}", store.path().display());
    let api = Arc::new(HttpApiClient::new(config.api_base_url.clone()));
    info!("remote api at {}", config.api_base_url);

    let mut controller = Controller::new(api, Box::new(store));
    controller.start().await;
    let app = router(AppState::new(controller));

    let addr = config.listen_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
