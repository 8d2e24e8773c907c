//! Constants and the TOML-backed runtime configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;
use crate::model::ContentFolders;

pub const NAME: &str = concat!("gallery_scan ", env!("CARGO_PKG_VERSION"));
/// Suffix marking the battlepass variant of a folder.
pub const BATTLEPASS_SUFFIX: &str = "_battlepass";
/// Store key the mapping is cached under.
pub const DEFAULT_CACHE_KEY: &str = "scannedImages";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_MANIFEST_PATH: &str = "manifest.json";
pub const DEFAULT_IMAGES_DIR: &str = "images";
/// Highest N probed in `image<N>.<ext>`.
pub const DEFAULT_MAX_IMAGES_PER_FOLDER: u32 = 50;
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];
/// How many HEAD probes may be in flight at once.
pub const DEFAULT_PROBE_CONCURRENCY: usize = 4;
pub const DEFAULT_SEASONS: [&str; 2] = ["season1", "season2"];
pub const DEFAULT_EVENTS: [&str; 3] = ["halloween", "christmas_2024", "summer"];

/// How the mapping is produced on a cache miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Trust `manifest.json`.
    #[default]
    Manifest,
    /// Probe candidate filenames one by one.
    Scan,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub max_images_per_folder: u32,
    pub extensions: Vec<String>,
    pub probe_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_images_per_folder: DEFAULT_MAX_IMAGES_PER_FOLDER,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            probe_concurrency: DEFAULT_PROBE_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub key: String,
    /// Store file. Falls back to the user cache directory when unset.
    pub path: Option<PathBuf>,
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_CACHE_KEY.to_string(),
            path: None,
            ttl_secs: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }

    /// The configured store path, or `<cache dir>/gallery_scan/store.json`.
    pub fn store_path(&self) -> Result<PathBuf, GalleryError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let mut path = dirs::cache_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| GalleryError::Config("Could not determine cache directory".into()))?;
        path.push("gallery_scan");
        path.push("store.json");
        Ok(path)
    }
}

/// Everything the binary needs, read from a single TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub base_url: String,
    pub strategy: Strategy,
    pub manifest_path: String,
    pub images_dir: String,
    pub request_timeout_secs: Option<u64>,
    pub content: ContentFolders,
    pub scan: ScanConfig,
    pub cache: CacheConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            strategy: Strategy::default(),
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
            request_timeout_secs: None,
            content: ContentFolders::default(),
            scan: ScanConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl GalleryConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, GalleryError> {
        toml::from_str(s).map_err(|e| GalleryError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, GalleryError> {
        let s = fs::read_to_string(path).map_err(|e| {
            GalleryError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&s)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
