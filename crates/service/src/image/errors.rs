use thiserror::Error;

/// Failures talking to the object store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("credentials error: {0}")]
    Credentials(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("storage responded {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failures of the upload/delete workflow.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("uploaded file has no original name")]
    MissingFileName,
    #[error("file name {0:?} has no usable extension")]
    MissingExtension(String),
    #[error("staging file error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
