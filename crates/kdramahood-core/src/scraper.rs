//! Main KdramaHood extraction API
//!
//! This module combines a [`PageFetcher`] with the parsers to extract series
//! metadata, single episodes, and whole episode ranges. Every operation
//! validates its URL before touching the network and performs its fetches
//! one after another; the first failure ends the operation.

use std::ops::RangeInclusive;

use tracing::{info, warn};

use crate::client::{ClientConfig, HoodClient, PageFetcher};
use crate::error::{KdramaError, Result};
use crate::parser::{parse_episode_record, parse_last_uploaded_episode, parse_series_record};
use crate::site::{slug_from_series_url, SiteLayout};
use crate::types::{EpisodeRecord, SeriesEpisodes, SeriesRecord};

/// Main extraction API for KdramaHood
///
/// # Example
/// ```no_run
/// use kdramahood_core::KdramaScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = KdramaScraper::new()?;
///
///     let series = scraper.get_series("https://kdramahood.com/dh/itaewon/").await?;
///     println!("{:?}", series.english_name());
///
///     Ok(())
/// }
/// ```
pub struct KdramaScraper<F = HoodClient> {
    fetcher: F,
    site: SiteLayout,
}

impl KdramaScraper<HoodClient> {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with a custom client configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = HoodClient::with_config(config)?;
        Ok(Self::with_fetcher(client, SiteLayout::default()))
    }
}

impl<F: PageFetcher> KdramaScraper<F> {
    /// Create a scraper over any fetcher and site layout.
    ///
    /// This is useful for testing or for pointing the rules at a mirror.
    pub fn with_fetcher(fetcher: F, site: SiteLayout) -> Self {
        Self { fetcher, site }
    }

    /// Site layout used for URL validation and episode URLs
    pub fn site(&self) -> &SiteLayout {
        &self.site
    }

    /// Underlying page fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Extract series metadata.
    ///
    /// # Returns
    /// * `Ok(SeriesRecord)` with every field found on the page
    /// * `Err(KdramaError::InvalidUrl)` if the URL is not a series URL
    /// * `Err(KdramaError::FetchFailure)` if the page cannot be fetched
    pub async fn get_series(&self, series_url: &str) -> Result<SeriesRecord> {
        self.site.require_series_url(series_url)?;

        let page = self.fetcher.fetch(series_url).await?;
        let record = parse_series_record(&page.html);

        info!(url = series_url, fields = record.len(), "series extracted");
        Ok(record)
    }

    /// Resolve the last uploaded episode number of a series.
    ///
    /// # Returns
    /// * `Ok(0)` if the page has no last-episode marker
    /// * `Err(KdramaError::ParseFailure)` if the marker is not a number
    pub async fn last_uploaded_episode(&self, series_url: &str) -> Result<u32> {
        self.site.require_series_url(series_url)?;

        let page = self.fetcher.fetch(series_url).await?;
        parse_last_uploaded_episode(&page.html)
    }

    /// Extract the streaming links of a single episode.
    ///
    /// # Returns
    /// * `Ok(EpisodeRecord)` with a non-empty link set
    /// * `Err(KdramaError::InvalidUrl)` if the URL is not an episode URL
    /// * `Err(KdramaError::FetchFailure)` if the page cannot be fetched
    /// * `Err(KdramaError::NoLinksFound)` if the page has no links
    pub async fn get_episode(&self, episode_url: &str) -> Result<EpisodeRecord> {
        self.site.require_episode_url(episode_url)?;

        let page = self.fetcher.fetch(episode_url).await?;
        parse_episode_record(&page.html, episode_url)
    }

    /// Extract every uploaded episode of a series.
    pub async fn get_episodes(&self, series_url: &str) -> Result<SeriesEpisodes> {
        self.get_episode_range(series_url, 1, 0).await
    }

    /// Extract the episodes `from..=to` of a series.
    ///
    /// `to == 0` means "up to the last uploaded episode". The range is clamped
    /// to `1..=last` before any episode is fetched. Episodes are fetched in
    /// ascending order and the first failure aborts the whole range; records
    /// extracted before it are discarded.
    ///
    /// # Returns
    /// * `Ok(SeriesEpisodes)` with one record per episode, in episode order
    /// * `Err(KdramaError::RangeOutOfBounds)` if the clamped range is empty
    /// * `Err(KdramaError::EpisodeFailed)` naming the first failing episode
    pub async fn get_episode_range(
        &self,
        series_url: &str,
        from: u32,
        to: u32,
    ) -> Result<SeriesEpisodes> {
        self.site.require_series_url(series_url)?;

        let page = self.fetcher.fetch(series_url).await?;
        let canonical_url = page.final_url;

        let last = self
            .site
            .require_series_url(&canonical_url)
            .and_then(|()| parse_last_uploaded_episode(&page.html))
            .map_err(|err| {
                warn!(url = %canonical_url, error = %err, "last uploaded episode unreadable");
                KdramaError::FetchFailure(
                    "failed to retrieve last uploaded episode number".to_string(),
                )
            })?;

        let range = clamp_range(from, to, last)?;

        let slug = slug_from_series_url(&canonical_url).ok_or_else(|| {
            KdramaError::InvalidUrl(format!("cannot derive show slug from {}", canonical_url))
        })?;

        info!(
            slug = %slug,
            from = *range.start(),
            to = *range.end(),
            "extracting episode range"
        );

        let mut episodes = Vec::new();
        for number in range {
            let episode_url = self.site.episode_url(&slug, number);
            match self.get_episode(&episode_url).await {
                Ok(record) => episodes.push(record),
                Err(err) => {
                    warn!(episode = number, error = %err, "episode extraction failed, aborting range");
                    return Err(KdramaError::for_episode(number, err));
                }
            }
        }

        Ok(SeriesEpisodes { episodes })
    }
}

/// Clamp a requested episode range to the uploaded episodes.
///
/// `to == 0` selects the last uploaded episode; `from` is raised to 1 and
/// `to` lowered to `last`.
///
/// # Examples
/// ```
/// use kdramahood_core::scraper::clamp_range;
///
/// assert_eq!(clamp_range(0, 0, 16).unwrap(), 1..=16);
/// assert_eq!(clamp_range(3, 40, 16).unwrap(), 3..=16);
/// assert!(clamp_range(10, 5, 16).is_err());
/// ```
pub fn clamp_range(from: u32, to: u32, last: u32) -> Result<RangeInclusive<u32>> {
    let to = if to == 0 { last } else { to };
    let from = from.max(1);
    let to = to.min(last);

    if from > to {
        return Err(KdramaError::RangeOutOfBounds { from, to, last });
    }

    Ok(from..=to)
}
