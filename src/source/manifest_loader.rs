use crate::config::DEFAULT_MANIFEST_PATH;
use crate::error::GalleryError;
use crate::host::ImageHost;
use crate::model::ImageMapping;
use crate::source::MappingSource;

/// Reads the whole mapping from a single JSON manifest.
pub struct ManifestLoader<H> {
    host: H,
    path: String,
}

impl<H: ImageHost> ManifestLoader<H> {
    pub fn new(host: H) -> Self {
        Self::with_path(host, DEFAULT_MANIFEST_PATH)
    }

    pub fn with_path(host: H, path: impl Into<String>) -> Self {
        Self {
            host,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait::async_trait]
impl<H: ImageHost> MappingSource for ManifestLoader<H> {
    fn name(&self) -> &'static str {
        "manifest loader"
    }

    async fn try_load(&self) -> Result<ImageMapping, GalleryError> {
        let body = self.host.fetch_text(&self.path).await?;
        let mapping: ImageMapping = serde_json::from_str(&body)
            .map_err(|e| GalleryError::ManifestParse(format!("{}: {}", self.path, e)))?;
        log::info!(
            "Loaded {} with {} folders and {} images",
            self.path,
            mapping.len(),
            mapping.image_count()
        );
        Ok(mapping)
    }
}
