use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::GalleryError;
use crate::host::ImageHost;

/// In-memory host for tests. Paths not registered anywhere answer 404.
#[derive(Default)]
pub struct MemoryHost {
    texts: HashMap<String, String>,
    files: HashSet<String>,
    broken: HashSet<String>,
    pub requests: Mutex<Vec<String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, path: &str, body: &str) -> Self {
        self.texts.insert(path.to_string(), body.to_string());
        self
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.files.insert(path.to_string());
        self
    }

    /// Requests for `path` fail as if the connection dropped.
    pub fn with_broken(mut self, path: &str) -> Self {
        self.broken.insert(path.to_string());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn record(&self, path: &str) -> Result<(), GalleryError> {
        self.requests.lock().unwrap().push(path.to_string());
        if self.broken.contains(path) {
            return Err(GalleryError::Network(format!("connection reset: {}", path)));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ImageHost for MemoryHost {
    async fn fetch_text(&self, path: &str) -> Result<String, GalleryError> {
        self.record(path)?;
        self.texts
            .get(path)
            .cloned()
            .ok_or_else(|| GalleryError::HttpStatus {
                status: 404,
                path: path.to_string(),
            })
    }

    async fn exists(&self, path: &str) -> Result<bool, GalleryError> {
        self.record(path)?;
        Ok(self.files.contains(path))
    }
}
