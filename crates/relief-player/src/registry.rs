//! Object URL registries.
//!
//! A registry issues revocable URLs for blobs and owns the bytes until the
//! URL is revoked. Browsers provide this natively; `BlobRegistry` is the
//! in-process equivalent.

use std::collections::HashMap;

use tracing::debug;

use relief_models::{Blob, ObjectUrl};

/// Issues and revokes object URLs.
pub trait ObjectUrlRegistry {
    /// Register a blob and return a fresh URL for it.
    fn create(&mut self, blob: Blob) -> ObjectUrl;

    /// Release a URL. Returns `false` if it was not live.
    fn revoke(&mut self, url: &ObjectUrl) -> bool;

    /// Look up the blob behind a live URL.
    fn resolve(&self, url: &ObjectUrl) -> Option<&Blob>;

    /// Number of URLs issued and not yet revoked.
    fn live_count(&self) -> usize;

    fn is_live(&self, url: &ObjectUrl) -> bool {
        self.resolve(url).is_some()
    }
}

/// In-memory registry.
#[derive(Debug, Default)]
pub struct BlobRegistry {
    entries: HashMap<ObjectUrl, Blob>,
    issued: u64,
    revoked: u64,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total URLs ever issued.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Total URLs ever revoked.
    pub fn revoked(&self) -> u64 {
        self.revoked
    }

    /// Currently live URLs, in no particular order.
    pub fn live_urls(&self) -> Vec<ObjectUrl> {
        self.entries.keys().cloned().collect()
    }
}

impl ObjectUrlRegistry for BlobRegistry {
    fn create(&mut self, blob: Blob) -> ObjectUrl {
        let url = ObjectUrl::generate();
        debug!(url = %url, bytes = blob.len(), "Issued object URL");
        self.entries.insert(url.clone(), blob);
        self.issued += 1;
        url
    }

    fn revoke(&mut self, url: &ObjectUrl) -> bool {
        if self.entries.remove(url).is_some() {
            debug!(url = %url, "Revoked object URL");
            self.revoked += 1;
            true
        } else {
            false
        }
    }

    fn resolve(&self, url: &ObjectUrl) -> Option<&Blob> {
        self.entries.get(url)
    }

    fn live_count(&self) -> usize {
        self.entries.len()
    }
}
