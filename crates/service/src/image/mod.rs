//! Image module: uploads client files to the cloud bucket and deletes them.
//!
//! Two layers: `storage` talks to the bucket, `service` owns naming, the
//! transient staging file and the fixed result strings returned to clients.

pub mod credentials;
pub mod errors;
pub mod staging;
pub mod storage;
pub mod service;

pub use errors::{ImageError, StorageError};
pub use service::{FileUpload, ImageConfig, ImageService};
pub use storage::{GcsObjectStorage, ObjectStorage};
