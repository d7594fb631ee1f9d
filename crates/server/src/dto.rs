use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result envelope returned by the character write endpoints and by `get` on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageEnvelope {
    pub message: String,
    pub method: String,
    pub status: bool,
}

impl MessageEnvelope {
    pub fn ok(method: &str, message: impl Into<String>) -> Self {
        Self { message: message.into(), method: method.to_string(), status: true }
    }

    pub fn failed(method: &str, message: impl Into<String>) -> Self {
        Self { message: message.into(), method: method.to_string(), status: false }
    }
}

/// Image upload result. `link` is the public URL, the failure sentinel, or
/// null when the request carried no file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadEnvelope {
    pub link: Option<String>,
    pub status: bool,
}
