//! Temporary references to in-memory binary data.

use std::collections::HashMap;
use std::fmt;

/// Bytes tagged with a media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Media type (e.g. `image/png`).
    pub media_type: String,
    /// Contents.
    pub bytes: Vec<u8>,
}

impl Blob {
    /// Create a blob.
    #[must_use]
    pub fn new(media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Short-lived handle to a registered [`Blob`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry handing out [`ObjectUrl`]s for blobs until they are revoked.
#[derive(Debug, Default)]
pub struct BlobRegistry {
    blobs: HashMap<ObjectUrl, Blob>,
    next_id: u64,
}

impl BlobRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blob and return a reference to it.
    pub fn create_object_url(&mut self, blob: Blob) -> ObjectUrl {
        self.next_id += 1;
        let url = ObjectUrl(format!("blob:texsnap/{}", self.next_id));
        tracing::debug!(url = %url, media_type = %blob.media_type, size = blob.bytes.len(), "Created object URL");
        self.blobs.insert(url.clone(), blob);
        url
    }

    /// Look up a live reference.
    #[must_use]
    pub fn get(&self, url: &ObjectUrl) -> Option<&Blob> {
        self.blobs.get(url)
    }

    /// Release a reference. Revoking twice is harmless.
    pub fn revoke_object_url(&mut self, url: &ObjectUrl) {
        if self.blobs.remove(url).is_some() {
            tracing::debug!(url = %url, "Revoked object URL");
        }
    }

    /// Number of live references.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.blobs.len()
    }
}
