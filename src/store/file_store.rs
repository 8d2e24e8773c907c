use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::GalleryError;
use crate::store::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// Persists all entries as one JSON object of strings.
///
/// A missing file reads as an empty store. Writes land in a temp file next to
/// the target and are renamed over it.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, GalleryError> {
        let s = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if s.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&s).map_err(|e| {
            GalleryError::Store(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), GalleryError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let s = serde_json::to_string_pretty(entries)
            .map_err(|e| GalleryError::Store(format!("Failed to encode store: {}", e)))?;
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(s.as_bytes())?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn update(&self, edit: impl FnOnce(&mut Entries)) -> Result<(), GalleryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| GalleryError::Store("file store lock poisoned".into()))?;
        // An unparsable file is replaced rather than blocking every write.
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(GalleryError::Store(e)) => {
                log::warn!("Discarding unreadable store: {}", e);
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        edit(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GalleryError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GalleryError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), GalleryError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
