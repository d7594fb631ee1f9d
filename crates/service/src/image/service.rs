use std::path::PathBuf;
use std::sync::Arc;

use common::metrics::{record_image_delete, record_image_upload};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::errors::ImageError;
use super::staging::TransientFile;
use super::storage::ObjectStorage;

/// Returned in place of a URL when an upload fails.
pub const UPLOAD_FAILED: &str = "Image couldn't upload, Something went wrong";
pub const DELETE_OK: &str = "File deleted successfully.";
pub const DELETE_FAILED: &str = "An error occurred while deleting the file.";

/// Image service configuration
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub bucket: String,
    /// Contains `{bucket}` and `{name}` placeholders.
    pub public_url_template: String,
    /// Prepended to names passed to `delete_file`.
    pub delete_prefix: String,
    pub staging_dir: PathBuf,
    pub content_type: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            bucket: "importadorakaleth.appspot.com".into(),
            public_url_template: "https://firebasestorage.googleapis.com/v0/b/{bucket}/o/{name}?alt=media".into(),
            delete_prefix: "api-dragonball/".into(),
            staging_dir: std::env::temp_dir(),
            content_type: "media".into(),
        }
    }
}

/// A file received from a client.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub original_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Random UUID plus the extension of `original` (from its last `.`, dot included).
pub fn generate_object_name(original: &str) -> Result<String, ImageError> {
    let ext = original
        .rfind('.')
        .map(|i| &original[i..])
        .ok_or_else(|| ImageError::MissingExtension(original.to_string()))?;
    if ext.contains(['/', '\\']) {
        return Err(ImageError::MissingExtension(original.to_string()));
    }
    Ok(format!("{}{}", Uuid::new_v4(), ext))
}

pub struct ImageService {
    storage: Arc<dyn ObjectStorage>,
    cfg: ImageConfig,
}

impl ImageService {
    pub fn new(storage: Arc<dyn ObjectStorage>, cfg: ImageConfig) -> Self { Self { storage, cfg } }

    /// Public download URL for an object at the bucket root.
    pub fn download_url(&self, name: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
        self.cfg
            .public_url_template
            .replace("{bucket}", &self.cfg.bucket)
            .replace("{name}", &encoded)
    }

    /// Stage the payload under a fresh name, push it to the bucket and return
    /// its public URL. The staging file is gone when this returns.
    #[instrument(skip(self, file), fields(original_name = ?file.original_name, size = file.bytes.len()))]
    pub async fn upload(&self, file: FileUpload) -> Result<String, ImageError> {
        let original = file
            .original_name
            .filter(|n| !n.is_empty())
            .ok_or(ImageError::MissingFileName)?;
        let name = generate_object_name(&original)?;

        let staged = TransientFile::write(&self.cfg.staging_dir, &name, &file.bytes).await?;
        let staged_path = staged.path().to_path_buf();
        let bytes = staged.read().await?;
        self.storage.upload(&name, bytes, &self.cfg.content_type).await?;
        if let Err(e) = staged.remove().await {
            warn!(path = %staged_path.display(), error = %e, "failed to remove staging file");
        }

        info!(object = %name, "image_uploaded");
        Ok(self.download_url(&name))
    }

    /// `upload`, with every failure logged and replaced by [`UPLOAD_FAILED`].
    pub async fn upload_or_sentinel(&self, file: FileUpload) -> String {
        match self.upload(file).await {
            Ok(url) => {
                record_image_upload(true);
                url
            }
            Err(e) => {
                error!(error = %e, "image upload failed");
                record_image_upload(false);
                UPLOAD_FAILED.to_string()
            }
        }
    }

    /// Delete `<delete_prefix><name>`; `Ok(false)` when the object did not exist.
    #[instrument(skip(self))]
    pub async fn delete_file(&self, name: &str) -> Result<bool, ImageError> {
        let object = format!("{}{}", self.cfg.delete_prefix, name);
        let existed = self.storage.delete(&object).await?;
        info!(%object, existed, "image_deleted");
        Ok(existed)
    }

    /// `delete_file` reduced to one of two fixed messages. Whether the object
    /// actually existed does not change the message.
    pub async fn delete_or_message(&self, name: &str) -> String {
        match self.delete_file(name).await {
            Ok(_) => {
                record_image_delete(true);
                DELETE_OK.to_string()
            }
            Err(e) => {
                error!(error = %e, "image delete failed");
                record_image_delete(false);
                DELETE_FAILED.to_string()
            }
        }
    }
}
