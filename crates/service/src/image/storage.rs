use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument};

use super::credentials::{fetch_access_token, Credentials};
use super::errors::StorageError;

/// Object-store operations the image service needs.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `name`, replacing any existing object.
    async fn upload(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;
    /// Remove `name`; `Ok(false)` when there was no such object.
    async fn delete(&self, name: &str) -> Result<bool, StorageError>;
}

/// Percent-encode an object name for use as a single URL path segment.
pub fn encode_object_name(name: &str) -> String {
    url::form_urlencoded::byte_serialize(name.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Google Cloud Storage JSON API client.
///
/// Every call loads the key and fetches a fresh access token; nothing is
/// cached between requests.
pub struct GcsObjectStorage {
    client: reqwest::Client,
    credentials: Credentials,
    bucket: String,
    api_base: String,
}

impl GcsObjectStorage {
    pub fn new(credentials: Credentials, bucket: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            bucket: bucket.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn authenticate(&self) -> Result<String, StorageError> {
        let key = self.credentials.load()?;
        fetch_access_token(&self.client, &key).await
    }
}

async fn status_error(resp: reqwest::Response) -> StorageError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    StorageError::Status { status, body }
}

#[async_trait]
impl ObjectStorage for GcsObjectStorage {
    #[instrument(skip(self, bytes), fields(bucket = %self.bucket, size = bytes.len()))]
    async fn upload(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let token = self.authenticate().await?;
        let url = format!("{}/upload/storage/v1/b/{}/o", self.api_base, self.bucket);
        let resp = self
            .client
            .post(url)
            .query(&[("uploadType", "media"), ("name", name)])
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }
        debug!("object uploaded");
        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        let token = self.authenticate().await?;
        let url = format!("{}/storage/v1/b/{}/o/{}", self.api_base, self.bucket, encode_object_name(name));
        let resp = self.client.delete(url).bearer_auth(token).send().await?;
        match resp.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            _ => Err(status_error(resp).await),
        }
    }
}

/// In-memory object store for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Keeps uploaded objects in a map; `failing()` rejects every call.
    #[derive(Default)]
    pub struct MemoryObjectStorage {
        fail: bool,
        objects: Mutex<BTreeMap<String, (String, Vec<u8>)>>,
        deleted: Mutex<Vec<String>>,
    }

    impl MemoryObjectStorage {
        pub fn failing() -> Self {
            Self { fail: true, ..Default::default() }
        }

        /// Names of stored objects, sorted.
        pub fn names(&self) -> Vec<String> {
            self.objects.lock().unwrap().keys().cloned().collect()
        }

        pub fn content_type(&self, name: &str) -> Option<String> {
            self.objects.lock().unwrap().get(name).map(|(ct, _)| ct.clone())
        }

        pub fn bytes(&self, name: &str) -> Option<Vec<u8>> {
            self.objects.lock().unwrap().get(name).map(|(_, b)| b.clone())
        }

        /// Every name passed to `delete`, in call order.
        pub fn delete_calls(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }

        fn check(&self) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::Status { status: 503, body: "bucket unavailable".into() });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ObjectStorage for MemoryObjectStorage {
        async fn upload(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
            self.check()?;
            self.objects.lock().unwrap().insert(name.to_string(), (content_type.to_string(), bytes));
            Ok(())
        }

        async fn delete(&self, name: &str) -> Result<bool, StorageError> {
            self.deleted.lock().unwrap().push(name.to_string());
            self.check()?;
            Ok(self.objects.lock().unwrap().remove(name).is_some())
        }
    }
}
