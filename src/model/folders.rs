use serde::{Deserialize, Serialize};

use crate::config::{BATTLEPASS_SUFFIX, DEFAULT_EVENTS, DEFAULT_SEASONS};

/// The known season and event folders.
///
/// A single instance is shared by the scanner, which uses it to decide which
/// folders to probe, and the classifier, which uses it to tell events apart
/// from seasons.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentFolders {
    /// Ongoing content folders, e.g. `season1`.
    pub seasons: Vec<String>,
    /// Time-limited content folders, e.g. `halloween`.
    pub events: Vec<String>,
}

impl Default for ContentFolders {
    fn default() -> Self {
        Self {
            seasons: DEFAULT_SEASONS.iter().map(|s| s.to_string()).collect(),
            events: DEFAULT_EVENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ContentFolders {
    pub fn new<S: Into<String>, E: Into<String>>(
        seasons: impl IntoIterator<Item = S>,
        events: impl IntoIterator<Item = E>,
    ) -> Self {
        Self {
            seasons: seasons.into_iter().map(Into::into).collect(),
            events: events.into_iter().map(Into::into).collect(),
        }
    }

    /// True for a configured event and for its battlepass variant.
    pub fn is_event_folder(&self, name: &str) -> bool {
        self.events.iter().any(|event| {
            name == event
                || name
                    .strip_prefix(event.as_str())
                    .is_some_and(|rest| rest == BATTLEPASS_SUFFIX)
        })
    }

    /// Every folder worth probing: each season then each event, each followed
    /// by its battlepass variant.
    pub fn candidate_folders(&self) -> Vec<String> {
        self.seasons
            .iter()
            .chain(self.events.iter())
            .flat_map(|base| [base.clone(), battlepass_folder_of(base)])
            .collect()
    }
}

pub fn is_battlepass_folder(name: &str) -> bool {
    name.ends_with(BATTLEPASS_SUFFIX)
}

pub fn battlepass_folder_of(base: &str) -> String {
    format!("{}{}", base, BATTLEPASS_SUFFIX)
}

/// Strip one trailing `_battlepass`.
pub fn base_folder(name: &str) -> &str {
    name.strip_suffix(BATTLEPASS_SUFFIX).unwrap_or(name)
}

/// Relative path of an image as served by the host.
pub fn image_path(images_dir: &str, folder: &str, file: &str) -> String {
    let dir = images_dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("{}/{}", folder, file)
    } else {
        format!("{}/{}/{}", dir, folder, file)
    }
}
