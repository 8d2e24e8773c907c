use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GalleryError;
use crate::host::ImageHost;

/// Resolves relative paths against a base URL and fetches them over HTTP.
#[derive(Debug, Clone)]
pub struct HttpImageHost {
    client: Client,
    base: Url,
}

impl HttpImageHost {
    /// `base_url` is treated as a directory even without a trailing slash.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, GalleryError> {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&base)
            .map_err(|e| GalleryError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GalleryError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn url_for(&self, path: &str) -> Result<Url, GalleryError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| GalleryError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

#[async_trait::async_trait]
impl ImageHost for HttpImageHost {
    async fn fetch_text(&self, path: &str) -> Result<String, GalleryError> {
        let url = self.url_for(path)?;
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| GalleryError::Network(format!("Failed to GET {}: {}", url, e)))?;

        if !resp.status().is_success() {
            return Err(GalleryError::HttpStatus {
                status: resp.status().as_u16(),
                path: path.to_string(),
            });
        }

        resp.text()
            .await
            .map_err(|e| GalleryError::Network(format!("Failed to read body from {}: {}", url, e)))
    }

    async fn exists(&self, path: &str) -> Result<bool, GalleryError> {
        let url = self.url_for(path)?;
        let resp = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| GalleryError::Network(format!("Failed to HEAD {}: {}", url, e)))?;
        Ok(resp.status().is_success())
    }
}
