use crate::core::poster::PosterFetcher;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use image::DynamicImage;
use tracing::debug;

/// Downloads poster images over HTTP.
#[derive(Default)]
pub struct HttpPosterFetcher;

impl HttpPosterFetcher {
    pub fn new() -> Self {
        HttpPosterFetcher
    }
}

#[async_trait]
impl PosterFetcher for HttpPosterFetcher {
    async fn fetch_poster(&self, url: &str) -> Result<DynamicImage> {
        debug!("Requesting poster from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("bollyinfo/1.0")
            .build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for poster URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for poster URL: {}",
                response.status(),
                url
            ));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read poster body from {url}"))?;
        image::load_from_memory(&bytes)
            .with_context(|| format!("Failed to decode poster image from {url}"))
    }
}
