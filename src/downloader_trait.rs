use crate::rcs_extractor::error::ParsingError;
use async_trait::async_trait;

/// Network seam of the crate. The host application decides how pages and
/// side-channel json documents are fetched; the extractor only ever asks
/// for the body of a url.
#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
pub trait Downloader {
    async fn download(&self, url: &str) -> Result<String, ParsingError>;
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait()]
pub trait Downloader {
    async fn download(&self, url: &str) -> Result<String, ParsingError>;
}
