//! Data types shared by the loaders, the cache and the classifier.

mod folders;
mod mapping;

pub use folders::{
    ContentFolders, base_folder, battlepass_folder_of, image_path, is_battlepass_folder,
};
pub use mapping::ImageMapping;
