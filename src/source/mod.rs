//! Ways of producing an [`ImageMapping`]: trust a manifest or probe for files.

mod folder_scanner;
mod manifest_loader;

pub use folder_scanner::FolderScanner;
pub use manifest_loader::ManifestLoader;

use crate::error::GalleryError;
use crate::model::ImageMapping;

#[async_trait::async_trait]
pub trait MappingSource: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &'static str;

    async fn try_load(&self) -> Result<ImageMapping, GalleryError>;

    /// Like [`try_load`](Self::try_load), but failures are logged and come back
    /// as an empty mapping.
    async fn load(&self) -> ImageMapping {
        match self.try_load().await {
            Ok(mapping) => mapping,
            Err(e) => {
                log::error!("{} failed: {}", self.name(), e);
                ImageMapping::new()
            }
        }
    }
}
