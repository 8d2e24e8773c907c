use futures::stream::{self, StreamExt};

use crate::config::{
    DEFAULT_EXTENSIONS, DEFAULT_IMAGES_DIR, DEFAULT_MAX_IMAGES_PER_FOLDER,
    DEFAULT_PROBE_CONCURRENCY, ScanConfig,
};
use crate::error::GalleryError;
use crate::host::ImageHost;
use crate::model::{ContentFolders, ImageMapping, image_path};
use crate::source::MappingSource;

/// Builds the mapping without a manifest by probing `image<N>.<ext>` in every
/// known folder.
///
/// There is no directory listing to lean on, so every candidate costs one HEAD
/// request: folders × `max_images_per_folder` × extensions in total.
pub struct FolderScanner<H> {
    host: H,
    content: ContentFolders,
    images_dir: String,
    extensions: Vec<String>,
    max_images_per_folder: u32,
    probe_concurrency: usize,
}

impl<H: ImageHost> FolderScanner<H> {
    pub fn new(host: H, content: ContentFolders) -> Self {
        Self {
            host,
            content,
            images_dir: DEFAULT_IMAGES_DIR.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_images_per_folder: DEFAULT_MAX_IMAGES_PER_FOLDER,
            probe_concurrency: DEFAULT_PROBE_CONCURRENCY,
        }
    }

    pub fn with_scan_config(mut self, scan: &ScanConfig) -> Self {
        self.extensions = scan.extensions.clone();
        self.max_images_per_folder = scan.max_images_per_folder;
        self.probe_concurrency = scan.probe_concurrency;
        self
    }

    pub fn with_images_dir(mut self, images_dir: impl Into<String>) -> Self {
        self.images_dir = images_dir.into();
        self
    }

    pub fn with_extensions<S: Into<String>>(
        mut self,
        extensions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_images_per_folder(mut self, max: u32) -> Self {
        self.max_images_per_folder = max;
        self
    }

    /// 1 probes strictly one candidate at a time.
    pub fn with_probe_concurrency(mut self, concurrency: usize) -> Self {
        self.probe_concurrency = concurrency;
        self
    }

    /// Filenames to try in one folder, in the order they are reported.
    fn candidate_files(&self) -> Vec<String> {
        (1..=self.max_images_per_folder)
            .flat_map(|n| {
                self.extensions
                    .iter()
                    .map(move |ext| format!("image{}.{}", n, ext))
            })
            .collect()
    }

    async fn probe(&self, path: &str) -> bool {
        match self.host.exists(path).await {
            Ok(found) => found,
            Err(e) => {
                log::debug!("Probe for {} failed, treating as absent: {}", path, e);
                false
            }
        }
    }

    /// Existing images in one folder. `buffered` yields in candidate order no
    /// matter which probe finishes first.
    async fn scan_folder(&self, folder: &str, candidates: &[String]) -> Vec<String> {
        let found: Vec<(String, bool)> = stream::iter(candidates.iter().cloned())
            .map(|file| async move {
                let path = image_path(&self.images_dir, folder, &file);
                let exists = self.probe(&path).await;
                (file, exists)
            })
            .buffered(self.probe_concurrency.max(1))
            .collect()
            .await;

        found
            .into_iter()
            .filter_map(|(file, exists)| exists.then_some(file))
            .collect()
    }
}

#[async_trait::async_trait]
impl<H: ImageHost> MappingSource for FolderScanner<H> {
    fn name(&self) -> &'static str {
        "folder scanner"
    }

    async fn try_load(&self) -> Result<ImageMapping, GalleryError> {
        let candidates = self.candidate_files();
        let mut mapping = ImageMapping::new();

        for folder in self.content.candidate_folders() {
            let images = self.scan_folder(&folder, &candidates).await;
            if images.is_empty() {
                log::debug!("No images in {}", folder);
                continue;
            }
            log::debug!("Found {} images in {}", images.len(), folder);
            mapping.insert(folder, images);
        }

        log::info!(
            "Scan finished: {} folders, {} images",
            mapping.len(),
            mapping.image_count()
        );
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory_host::MemoryHost;

    fn scanner(host: MemoryHost) -> FolderScanner<MemoryHost> {
        FolderScanner::new(host, ContentFolders::new(["season1"], ["halloween"]))
    }

    #[tokio::test]
    async fn single_existing_file_is_found_and_empty_folders_dropped() {
        let host = MemoryHost::new().with_file("images/season1/image1.png");
        let scanner = scanner(host)
            .with_max_images_per_folder(2)
            .with_extensions(["png"]);

        let mapping = scanner.load().await;
        assert_eq!(serde_json::to_string(&mapping).unwrap(), r#"{"season1":["image1.png"]}"#);
        assert!(!mapping.contains("season1_battlepass"));
        // 4 folders x 2 numbers x 1 extension
        assert_eq!(scanner.host.request_count(), 8);
    }

    #[tokio::test]
    async fn lists_are_ordered_by_number_then_extension() {
        let host = MemoryHost::new()
            .with_file("images/halloween_battlepass/image2.png")
            .with_file("images/halloween_battlepass/image1.jpg")
            .with_file("images/halloween_battlepass/image1.png")
            .with_file("images/season1/image3.gif");
        let scanner = scanner(host)
            .with_max_images_per_folder(3)
            .with_extensions(["png", "jpg", "gif"])
            .with_probe_concurrency(16);

        let mapping = scanner.load().await;
        assert_eq!(mapping.folders().collect::<Vec<_>>(), vec!["season1", "halloween_battlepass"]);
        assert_eq!(
            mapping.get("halloween_battlepass").unwrap(),
            ["image1.png", "image1.jpg", "image2.png"]
        );
        assert_eq!(mapping.get("season1").unwrap(), ["image3.gif"]);
    }

    #[tokio::test]
    async fn failed_probes_count_as_absent() {
        let host = MemoryHost::new()
            .with_broken("images/season1/image1.png")
            .with_file("images/season1/image2.png");
        let scanner = scanner(host)
            .with_max_images_per_folder(2)
            .with_extensions(["png"]);

        let mapping = scanner.try_load().await.unwrap();
        assert_eq!(mapping.get("season1").unwrap(), ["image2.png"]);
        assert_eq!(scanner.host.request_count(), 8);
    }

    #[tokio::test]
    async fn sequential_probing_visits_candidates_in_order() {
        let content = ContentFolders::new(["s"], Vec::<String>::new());
        let scanner = FolderScanner::new(MemoryHost::new(), content)
            .with_images_dir("img")
            .with_max_images_per_folder(2)
            .with_extensions(["png", "jpg"])
            .with_probe_concurrency(1);

        assert!(scanner.load().await.is_empty());
        assert_eq!(
            *scanner.host.requests.lock().unwrap(),
            vec![
                "img/s/image1.png",
                "img/s/image1.jpg",
                "img/s/image2.png",
                "img/s/image2.jpg",
                "img/s_battlepass/image1.png",
                "img/s_battlepass/image1.jpg",
                "img/s_battlepass/image2.png",
                "img/s_battlepass/image2.jpg",
            ]
        );
    }

    #[tokio::test]
    async fn zero_max_probes_nothing() {
        let scanner = scanner(MemoryHost::new().with_file("images/season1/image1.png"))
            .with_max_images_per_folder(0);
        assert!(scanner.load().await.is_empty());
        assert_eq!(scanner.host.request_count(), 0);
    }
}
