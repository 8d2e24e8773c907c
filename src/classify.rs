//! Folder classification by naming convention.
//!
//! The groups overlap: an event's battlepass folder (`halloween_battlepass`) is
//! both a battlepass folder and an event folder and shows up in both lists.
//! Season folders exclude events as well as battlepass folders, so they are a
//! subset of the active content folders rather than the same set.

use serde::Serialize;

use crate::model::{ContentFolders, ImageMapping, is_battlepass_folder};

fn folders_where(images: &ImageMapping, keep: impl Fn(&str) -> bool) -> Vec<String> {
    images
        .folders()
        .filter(|folder| keep(folder))
        .map(str::to_string)
        .collect()
}

/// Folders that are not battlepass variants.
pub fn active_content_folders(images: &ImageMapping) -> Vec<String> {
    folders_where(images, |folder| !is_battlepass_folder(folder))
}

pub fn battlepass_folders(images: &ImageMapping) -> Vec<String> {
    folders_where(images, is_battlepass_folder)
}

pub fn event_folders(images: &ImageMapping, content: &ContentFolders) -> Vec<String> {
    folders_where(images, |folder| content.is_event_folder(folder))
}

/// Folders that are neither events nor battlepass variants.
pub fn season_folders(images: &ImageMapping, content: &ContentFolders) -> Vec<String> {
    folders_where(images, |folder| {
        !content.is_event_folder(folder) && !is_battlepass_folder(folder)
    })
}

/// Image filenames of a battlepass folder paired with the level that unlocks
/// them. The first image is level 1.
pub fn battlepass_tiers<'a>(images: &'a ImageMapping, folder: &str) -> Vec<(u32, &'a str)> {
    if !is_battlepass_folder(folder) {
        return Vec::new();
    }
    images
        .get(folder)
        .unwrap_or_default()
        .iter()
        .zip(1u32..)
        .map(|(file, level)| (level, file.as_str()))
        .collect()
}

/// All four folder groups of a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub active: Vec<String>,
    pub battlepass: Vec<String>,
    pub events: Vec<String>,
    pub seasons: Vec<String>,
}

impl Classification {
    pub fn of(images: &ImageMapping, content: &ContentFolders) -> Self {
        Self {
            active: active_content_folders(images),
            battlepass: battlepass_folders(images),
            events: event_folders(images, content),
            seasons: season_folders(images, content),
        }
    }
}
