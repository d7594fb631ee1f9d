use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// A request-scoped file in the staging directory, removed when dropped.
///
/// The guard exists before the first byte is written, so a failed write or an
/// early return on any later step still removes whatever reached the disk.
/// `remove` deletes the file without blocking; `Drop` covers the error paths
/// with a blocking remove.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
    removed: bool,
}

impl TransientFile {
    pub async fn write(dir: &Path, name: &str, bytes: &[u8]) -> io::Result<Self> {
        let guard = Self { path: dir.join(name), removed: false };
        tokio::fs::write(&guard.path, bytes).await?;
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    /// Delete the file now. `Drop` does nothing afterwards, even on error.
    pub async fn remove(mut self) -> io::Result<()> {
        self.removed = true;
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove staging file");
            }
        }
    }
}
