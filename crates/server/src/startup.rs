use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, RequiredFields};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};
use service::{
    carts::CARTS,
    products::{RequiredFieldPolicy, PRODUCTS},
    runtime,
    storage::{CollectionStore, JsonFileStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn required_field_policy(cfg: &AppConfig) -> RequiredFieldPolicy {
    match cfg.validation.required_fields {
        RequiredFields::Truthy => RequiredFieldPolicy::Truthy,
        RequiredFields::Present => RequiredFieldPolicy::Present,
    }
}

/// File store with one JSON file per collection under the configured data dir
pub fn build_store(cfg: &AppConfig) -> Arc<dyn CollectionStore> {
    let storage = &cfg.storage;
    Arc::new(
        JsonFileStore::new(&storage.data_dir)
            .with_file(PRODUCTS, &storage.products_file)
            .with_file(CARTS, &storage.carts_file),
    )
}

/// Build the application router from a loaded configuration
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = ServerState::new(build_store(cfg), required_field_policy(cfg));
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server.
/// Expects `.env` and logging to be set up by the binary.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    runtime::ensure_env(&cfg.storage.data_dir).await?;

    let app = build_app(&cfg);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(
        %addr,
        data_dir = %cfg.storage.data_dir.display(),
        required_fields = ?cfg.validation.required_fields,
        "server is running"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        // no signal handler: serve until the process is killed
        Err(_) => std::future::pending::<()>().await,
    }
}
