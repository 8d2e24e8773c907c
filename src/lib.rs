//! Season, event and battlepass image folders: load the folder mapping from a
//! manifest or by probing for files, cache it, and classify the folders.

pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod host;
pub mod model;
pub mod prelude;
pub mod source;
pub mod store;

use crate::prelude::*;

/// Build the mapping source named by `config.strategy`.
pub fn source_from_config(config: &GalleryConfig) -> Result<Box<dyn MappingSource>, GalleryError> {
    let host = HttpImageHost::new(&config.base_url, config.request_timeout())?;
    let source: Box<dyn MappingSource> = match config.strategy {
        Strategy::Manifest => Box::new(ManifestLoader::with_path(
            host,
            config.manifest_path.clone(),
        )),
        Strategy::Scan => Box::new(
            FolderScanner::new(host, config.content.clone())
                .with_images_dir(config.images_dir.clone())
                .with_scan_config(&config.scan),
        ),
    };
    Ok(source)
}

/// Build the file-backed cache described by `config.cache`.
pub fn cache_from_config(config: &GalleryConfig) -> Result<ImageCache<FileStore>, GalleryError> {
    let store = FileStore::new(config.cache.store_path()?);
    Ok(ImageCache::new(store)
        .with_key(config.cache.key.clone())
        .with_ttl(config.cache.ttl()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_picks_the_source() {
        let mut config = GalleryConfig::default();
        assert_eq!(source_from_config(&config).unwrap().name(), "manifest loader");
        config.strategy = Strategy::Scan;
        assert_eq!(source_from_config(&config).unwrap().name(), "folder scanner");
        config.base_url = "::".into();
        assert!(source_from_config(&config).is_err());
    }

    #[test]
    fn cache_uses_configured_key_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GalleryConfig::default();
        config.cache.path = Some(dir.path().join("store.json"));
        config.cache.key = "gallery".into();

        let cache = cache_from_config(&config).unwrap();
        assert_eq!(cache.key(), "gallery");
        assert_eq!(cache.store().path(), dir.path().join("store.json"));
    }
}
