//! Keeps the last computed mapping in a key-value store so later runs can skip
//! fetching or scanning.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::DEFAULT_CACHE_KEY;
use crate::error::GalleryError;
use crate::model::ImageMapping;
use crate::source::MappingSource;
use crate::store::KeyValueStore;

pub struct ImageCache<S> {
    store: S,
    key: String,
    ttl: Option<Duration>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl<S: KeyValueStore> ImageCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_CACHE_KEY.to_string(),
            ttl: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Entries older than `ttl` are recomputed. `None` never expires.
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn stored_at_key(&self) -> String {
        format!("{}.storedAt", self.key)
    }

    fn is_fresh(&self) -> Result<bool, GalleryError> {
        let Some(ttl) = self.ttl else {
            return Ok(true);
        };
        let stored_at = self
            .store
            .get(&self.stored_at_key())?
            .and_then(|s| s.trim().parse::<u64>().ok());
        Ok(match stored_at {
            Some(stored_at) => now_secs().saturating_sub(stored_at) <= ttl.as_secs(),
            None => false,
        })
    }

    /// The stored mapping, if there is a usable one.
    pub fn cached(&self) -> Result<Option<ImageMapping>, GalleryError> {
        let raw = match self.store.get(&self.key)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };
        if !self.is_fresh()? {
            log::info!("Cached {} is stale", self.key);
            return Ok(None);
        }
        match serde_json::from_str(&raw) {
            Ok(mapping) => Ok(Some(mapping)),
            Err(e) => {
                log::warn!("Ignoring undecodable cache entry {}: {}", self.key, e);
                Ok(None)
            }
        }
    }

    pub fn put(&self, mapping: &ImageMapping) -> Result<(), GalleryError> {
        let raw = serde_json::to_string(mapping)
            .map_err(|e| GalleryError::Store(format!("Failed to encode mapping: {}", e)))?;
        self.store.set(&self.key, &raw)?;
        if self.ttl.is_some() {
            self.store.set(&self.stored_at_key(), &now_secs().to_string())?;
        }
        Ok(())
    }

    /// Drop the stored mapping so the next lookup recomputes it.
    pub fn invalidate(&self) -> Result<(), GalleryError> {
        self.store.remove(&self.key)?;
        self.store.remove(&self.stored_at_key())
    }

    /// Return the cached mapping, or compute it with `source` and store it.
    ///
    /// Never fails: lookup, source and store errors are logged, and a failed
    /// source yields an empty mapping that is not stored.
    pub async fn get_or_scan_images(&self, source: &dyn MappingSource) -> ImageMapping {
        match self.cached() {
            Ok(Some(mapping)) => {
                log::info!("Loaded {} folders from cache", mapping.len());
                return mapping;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Cache lookup failed, recomputing: {}", e),
        }

        log::info!("Cache miss, running {}", source.name());
        let mapping = match source.try_load().await {
            Ok(mapping) => mapping,
            Err(e) => {
                log::error!("{} failed: {}", source.name(), e);
                return ImageMapping::new();
            }
        };

        if let Err(e) = self.put(&mapping) {
            log::warn!("Failed to store {}: {}", self.key, e);
        }
        mapping
    }

    /// Like [`get_or_scan_images`](Self::get_or_scan_images) but every failure
    /// reaches the caller.
    pub async fn try_get_or_scan_images(
        &self,
        source: &dyn MappingSource,
    ) -> Result<ImageMapping, GalleryError> {
        if let Some(mapping) = self.cached()? {
            return Ok(mapping);
        }
        let mapping = source.try_load().await?;
        self.put(&mapping)?;
        Ok(mapping)
    }
}
