use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;

#[async_trait]
pub trait PosterFetcher: Send + Sync {
    /// Downloads and decodes the image at `url`.
    async fn fetch_poster(&self, url: &str) -> Result<DynamicImage>;
}
