//! Binary payloads and the revocable URLs that expose them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheme prefix of every issued object URL.
pub const OBJECT_URL_SCHEME: &str = "blob:relief/";

/// Opaque binary payload (video bytes).
///
/// Either picked from the local filesystem or returned by a generation call.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
    content_type: Option<String>,
    name: Option<String>,
}

impl Blob {
    /// Create a blob from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            content_type: None,
            name: None,
        }
    }

    /// Attach a MIME type (e.g. `video/mp4`).
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Attach the original file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the blob and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

// Bytes elided.
impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("len", &self.data.len())
            .field("content_type", &self.content_type)
            .field("name", &self.name)
            .finish()
    }
}

/// Temporary reference to a registered blob.
///
/// Issued by a URL registry and valid until revoked. Holding an `ObjectUrl`
/// does not keep the blob alive; the registry owns the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Mint a fresh, unique URL.
    pub fn generate() -> Self {
        Self(format!("{}{}", OBJECT_URL_SCHEME, Uuid::new_v4()))
    }

    /// Wrap an existing URL string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ObjectUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
