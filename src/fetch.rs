//! Story page fetching.
//!
//! The processor only needs "give me the HTML body behind this URL", so that
//! boundary is a small trait. The real implementation goes through
//! `reqwest`; tests substitute an in-memory map.

use std::error::Error;

use tracing::{debug, instrument};

/// Fetches the HTML body of a story page.
pub trait PageFetcher {
    /// Retrieve the page at `url` as text.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// [`PageFetcher`] backed by plain HTTP GET requests.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let body = reqwest::get(url).await?.error_for_status()?.text().await?;
        debug!(bytes = body.len(), "Fetched story page");
        Ok(body)
    }
}
