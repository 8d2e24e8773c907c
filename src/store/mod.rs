//! String key-value stores backing the image cache.

mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::error::GalleryError;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, GalleryError>;
    fn set(&self, key: &str, value: &str) -> Result<(), GalleryError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), GalleryError>;
}
