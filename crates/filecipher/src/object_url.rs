use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use uuid::Uuid;

const OBJECT_URL_PREFIX: &str = "blob:filecipher/";

/// Reference to bytes held by an [`ObjectUrls`] registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    fn generate() -> Self {
        Self(format!("{}{}", OBJECT_URL_PREFIX, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared registry of object urls. Clones share the same entries.
///
/// Entries stay alive until revoked.
#[derive(Debug, Clone, Default)]
pub struct ObjectUrls {
    entries: Arc<Mutex<HashMap<ObjectUrl, Bytes>>>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, bytes: Bytes) -> ObjectUrl {
        let url = ObjectUrl::generate();
        tracing::debug!("created {} ({} bytes)", url, bytes.len());
        self.entries.lock().insert(url.clone(), bytes);
        url
    }

    pub fn resolve(&self, url: &ObjectUrl) -> Option<Bytes> {
        self.entries.lock().get(url).cloned()
    }

    /// Returns whether the url was still live.
    pub fn revoke(&self, url: &ObjectUrl) -> bool {
        let revoked = self.entries.lock().remove(url).is_some();
        if revoked {
            tracing::debug!("revoked {}", url);
        }
        revoked
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
