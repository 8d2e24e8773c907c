//! Where manifests and images are fetched from.

mod http_host;
pub use http_host::HttpImageHost;

#[cfg(test)]
pub(crate) mod memory_host;

use crate::error::GalleryError;

#[async_trait::async_trait]
pub trait ImageHost: Send + Sync {
    /// Fetch a text resource. A non-success status is an error.
    async fn fetch_text(&self, path: &str) -> Result<String, GalleryError>;
    /// Metadata-only existence check. Only transport failures are errors.
    async fn exists(&self, path: &str) -> Result<bool, GalleryError>;
}

#[async_trait::async_trait]
impl<T: ImageHost + ?Sized> ImageHost for std::sync::Arc<T> {
    async fn fetch_text(&self, path: &str) -> Result<String, GalleryError> {
        (**self).fetch_text(path).await
    }

    async fn exists(&self, path: &str) -> Result<bool, GalleryError> {
        (**self).exists(path).await
    }
}
