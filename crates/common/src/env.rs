//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before any request is served.

use std::path::Path;

use tracing::info;

/// Ensure the data directory exists, creating it if needed.
pub async fn ensure_env(data_dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_err() {
        info!(data_dir = %data_dir.display(), "creating data directory");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    Ok(())
}
