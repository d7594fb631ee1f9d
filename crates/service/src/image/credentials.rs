use std::fmt;
use std::path::{Path, PathBuf};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header as JwtHeader};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::StorageError;

pub const STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

fn default_token_uri() -> String { "https://oauth2.googleapis.com/token".into() }

/// The fields of a Google service-account JSON key that token exchange needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::Credentials(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StorageError::Credentials(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// RS256-signed assertion for the JWT bearer grant, valid for one hour from `now`.
    pub fn signed_assertion(&self, scope: &str, now: i64) -> Result<String, StorageError> {
        #[derive(Serialize)]
        struct Claims<'a> { iss: &'a str, scope: &'a str, aud: &'a str, iat: i64, exp: i64 }
        let claims = Claims { iss: &self.client_email, scope, aud: &self.token_uri, iat: now, exp: now + 3600 };
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| StorageError::Credentials(e.to_string()))?;
        encode(&JwtHeader::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| StorageError::Credentials(e.to_string()))
    }
}

/// Where the storage client finds its service-account key.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Read from disk on every call.
    File(PathBuf),
    Inline(ServiceAccountKey),
}

impl Credentials {
    pub fn load(&self) -> Result<ServiceAccountKey, StorageError> {
        match self {
            Credentials::File(path) => ServiceAccountKey::from_file(path),
            Credentials::Inline(key) => Ok(key.clone()),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange a signed assertion for an OAuth2 access token.
pub async fn fetch_access_token(client: &reqwest::Client, key: &ServiceAccountKey) -> Result<String, StorageError> {
    let assertion = key.signed_assertion(STORAGE_SCOPE, chrono::Utc::now().timestamp())?;
    let resp = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(StorageError::Auth(format!("token endpoint returned {status}: {body}")));
    }
    let token: TokenResponse = resp.json().await?;
    debug!(client_email = %key.client_email, "storage access token issued");
    Ok(token.access_token)
}
