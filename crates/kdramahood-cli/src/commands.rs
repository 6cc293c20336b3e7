//! Commands of the `kdramahood` binary
//!
//! Each command runs one extraction and renders the result as indented JSON,
//! or returns the error message.

use serde::Serialize;

use kdramahood_core::{KdramaScraper, PageFetcher};

/// Print series metadata as JSON.
pub async fn series<F: PageFetcher>(scraper: &KdramaScraper<F>, url: &str) -> Result<String, String> {
    let record = scraper.get_series(url).await.map_err(|e| e.to_string())?;
    to_json(&record)
}

/// Print one episode as JSON.
pub async fn episode<F: PageFetcher>(scraper: &KdramaScraper<F>, url: &str) -> Result<String, String> {
    let record = scraper.get_episode(url).await.map_err(|e| e.to_string())?;
    to_json(&record)
}

/// Print an episode range as JSON.
pub async fn episodes<F: PageFetcher>(
    scraper: &KdramaScraper<F>,
    url: &str,
    from: u32,
    to: u32,
) -> Result<String, String> {
    let result = scraper
        .get_episode_range(url, from, to)
        .await
        .map_err(|e| e.to_string())?;
    to_json(&result)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}
