use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error {status} for {path}")]
    HttpStatus { status: u16, path: String },
    #[error("Manifest parse error: {0}")]
    ManifestParse(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Store error: {0}")]
    Store(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Internal IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Other error: {0}")]
    Other(String),
}
