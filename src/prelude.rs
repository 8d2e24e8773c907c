pub use crate::cache::ImageCache;
pub use crate::classify::{
    Classification, active_content_folders, battlepass_folders, battlepass_tiers, event_folders,
    season_folders,
};
pub use crate::config::{GalleryConfig, Strategy};
pub use crate::error::GalleryError;
pub use crate::host::{HttpImageHost, ImageHost};
pub use crate::model::{ContentFolders, ImageMapping, is_battlepass_folder};
pub use crate::source::{FolderScanner, ManifestLoader, MappingSource};
pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
