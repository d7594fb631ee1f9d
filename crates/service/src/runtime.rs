//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::*` without depending directly on `common`.

/// Ensure the upload staging directory exists.
pub async fn ensure_staging_dir(staging_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_staging_dir(staging_dir).await
}

/// Report whether the storage credential file is present.
pub async fn check_credentials_file(path: &str) -> bool {
    common::env::check_credentials_file(path).await
}
