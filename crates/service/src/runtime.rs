//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can prepare the
//! data directory through `service::runtime` alone.

use std::path::Path;

/// Ensure the data directory exists before any collection is written.
pub async fn ensure_env(data_dir: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir).await
}
