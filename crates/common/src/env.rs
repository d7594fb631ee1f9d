//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::{info, warn};

/// Ensure the upload staging directory exists and is writable.
///
/// Uploaded images are written here for the duration of a single request,
/// so a missing directory would turn every upload into a failure.
pub async fn ensure_staging_dir(staging_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(staging_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {staging_dir}: {e}"))?;
    let meta = tokio::fs::metadata(staging_dir).await?;
    if meta.permissions().readonly() {
        warn!(%staging_dir, "staging directory is read-only; image uploads will fail");
    } else {
        info!(%staging_dir, "staging directory ready");
    }
    Ok(())
}

/// Warn when the storage credential file is missing; the server still starts
/// and the image endpoints report failures per request.
pub async fn check_credentials_file(path: &str) -> bool {
    if tokio::fs::metadata(path).await.is_err() {
        warn!(credentials_path = %path, "service account credentials not found; image endpoints will fail");
        return false;
    }
    true
}
