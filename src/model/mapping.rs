use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Folder name to the image filenames found in it, in discovery order.
///
/// Serializes as a JSON object and keeps the key order of the document it was
/// read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMapping {
    entries: Vec<(String, Vec<String>)>,
}

impl ImageMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a folder. An existing folder keeps its position and gets the new list.
    ///
    /// Looks the folder up linearly; bulk loads go through the deserializer,
    /// which indexes keys instead.
    pub fn insert(&mut self, folder: impl Into<String>, images: Vec<String>) {
        let folder = folder.into();
        match self.entries.iter_mut().find(|(name, _)| *name == folder) {
            Some((_, existing)) => *existing = images,
            None => self.entries.push((folder, images)),
        }
    }

    pub fn get(&self, folder: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == folder)
            .map(|(_, images)| images.as_slice())
    }

    pub fn contains(&self, folder: &str) -> bool {
        self.get(folder).is_some()
    }

    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, images)| (name.as_str(), images.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of images across all folders.
    pub fn image_count(&self) -> usize {
        self.entries.iter().map(|(_, images)| images.len()).sum()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for ImageMapping {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut mapping = ImageMapping::new();
        for (folder, images) in iter {
            mapping.insert(folder, images);
        }
        mapping
    }
}

impl Serialize for ImageMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (folder, images) in &self.entries {
            map.serialize_entry(folder, images)?;
        }
        map.end()
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = ImageMapping;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of folder names to filename arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        while let Some((folder, images)) = access.next_entry::<String, Vec<String>>()? {
            match positions.get(&folder) {
                Some(&at) => entries[at].1 = images,
                None => {
                    positions.insert(folder.clone(), entries.len());
                    entries.push((folder, images));
                }
            }
        }
        Ok(ImageMapping { entries })
    }
}

impl<'de> Deserialize<'de> for ImageMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn json_key_order_is_kept() {
        let mapping: ImageMapping =
            serde_json::from_str(r#"{"zeta": ["z.png"], "alpha": [], "mid": ["a.png", "b.png"]}"#)
                .unwrap();
        assert_eq!(mapping.folders().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(mapping.get("mid"), Some(&names(&["a.png", "b.png"])[..]));
        assert_eq!(mapping.image_count(), 3);
        assert_eq!(
            serde_json::to_string(&mapping).unwrap(),
            r#"{"zeta":["z.png"],"alpha":[],"mid":["a.png","b.png"]}"#
        );
    }

    #[test]
    fn reinserting_a_folder_replaces_in_place() {
        let mut mapping = ImageMapping::new();
        mapping.insert("a", names(&["1.png"]));
        mapping.insert("b", names(&["2.png"]));
        mapping.insert("a", names(&["3.png"]));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.folders().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(mapping.get("a"), Some(&names(&["3.png"])[..]));
    }

    #[test]
    fn duplicate_json_keys_keep_the_last_list() {
        let mapping: ImageMapping =
            serde_json::from_str(r#"{"a": ["old.png"], "b": [], "a": ["new.png"]}"#).unwrap();
        assert_eq!(mapping.folders().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(mapping.get("a"), Some(&names(&["new.png"])[..]));
    }

    #[test]
    fn large_manifest_keeps_order_and_last_duplicate() {
        let mut doc: Vec<String> = (0..20_000)
            .map(|i| format!(r#""folder{}": ["image1.png"]"#, i))
            .collect();
        doc.push(r#""folder7": ["image9.png"]"#.to_string());
        let json = format!("{{{}}}", doc.join(","));

        let mapping: ImageMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(mapping.len(), 20_000);
        assert_eq!(mapping.folders().nth(7), Some("folder7"));
        assert_eq!(mapping.get("folder7"), Some(&names(&["image9.png"])[..]));
        assert_eq!(mapping.folders().last(), Some("folder19999"));
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(serde_json::from_str::<ImageMapping>(r#"["a.png"]"#).is_err());
        assert!(serde_json::from_str::<ImageMapping>(r#"{"a": "a.png"}"#).is_err());
    }
}
