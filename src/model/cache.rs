//! Content-addressed cache of decoded models
//!
//! Uploads are keyed by the SHA-256 digest of their bytes plus their format,
//! so re-uploading the same artifact skips decoding. Entries are immutable
//! adapters shared behind `Arc`.

use super::adapter::ModelAdapter;
use super::artifact::ArtifactFormat;
use super::ModelError;
use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Hex SHA-256 digest of an artifact, prefixed `sha256-`
pub fn artifact_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256-{}", hex::encode(hasher.finalize()))
}

/// LRU cache of decoded model adapters
pub struct ModelCache {
    /// `None` when caching is disabled (capacity 0)
    entries: Option<Mutex<LruCache<String, Arc<ModelAdapter>>>>,
}

impl ModelCache {
    /// Create a cache holding at most `capacity` models; 0 disables caching
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |entries| lock(entries).cap().get())
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |entries| lock(entries).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode `bytes` as the artifact named `file_name`, reusing a cached
    /// adapter for identical content
    pub fn get_or_load(
        &self,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<Arc<ModelAdapter>, ModelError> {
        let format = ArtifactFormat::from_file_name(file_name)?;

        let Some(entries) = &self.entries else {
            return ModelAdapter::from_bytes(bytes, file_name).map(Arc::new);
        };

        let key = format!("{}.{}", artifact_digest(bytes), format.extension());
        if let Some(adapter) = lock(entries).get(&key) {
            tracing::debug!(key = %key, "model cache hit");
            return Ok(Arc::clone(adapter));
        }

        // Decode without holding the lock; a concurrent miss on the same
        // key decodes twice and the later insert wins.
        let adapter = Arc::new(ModelAdapter::from_bytes(bytes, file_name)?);
        lock(entries).put(key.clone(), Arc::clone(&adapter));
        tracing::debug!(key = %key, "model cache insert");

        Ok(adapter)
    }

    pub fn clear(&self) {
        if let Some(entries) = &self.entries {
            lock(entries).clear();
        }
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new(16)
    }
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

/// Cached adapters are immutable, so a poisoned lock is still consistent
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
