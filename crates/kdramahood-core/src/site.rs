//! URL layout of the KdramaHood site
//!
//! Series pages live under `/dh/`, episode pages under `/nt/`, and episode
//! URLs are derived from the series slug as `<episode prefix><slug>-ep-<n>/`.

use crate::error::{KdramaError, Result};

/// Default series path prefix
pub const SERIES_PREFIX: &str = "https://kdramahood.com/dh/";

/// Default episode path prefix
pub const EPISODE_PREFIX: &str = "https://kdramahood.com/nt/";

/// Path prefixes the extractors accept and generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// Prefix every series URL must start with
    pub series_prefix: String,
    /// Prefix every episode URL must start with
    pub episode_prefix: String,
}

impl Default for SiteLayout {
    fn default() -> Self {
        Self {
            series_prefix: SERIES_PREFIX.to_string(),
            episode_prefix: EPISODE_PREFIX.to_string(),
        }
    }
}

impl SiteLayout {
    /// Layout rooted at a different origin, e.g. a mirror or a local test server.
    ///
    /// # Example
    /// ```
    /// use kdramahood_core::SiteLayout;
    ///
    /// let site = SiteLayout::with_origin("http://127.0.0.1:8080/");
    /// assert_eq!(site.series_prefix, "http://127.0.0.1:8080/dh/");
    /// assert_eq!(site.episode_prefix, "http://127.0.0.1:8080/nt/");
    /// ```
    pub fn with_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            series_prefix: format!("{}/dh/", origin),
            episode_prefix: format!("{}/nt/", origin),
        }
    }

    /// Whether `url` starts with the series prefix (ASCII case-insensitive).
    pub fn is_series_url(&self, url: &str) -> bool {
        starts_with_ignore_case(url, &self.series_prefix)
    }

    /// Whether `url` starts with the episode prefix (ASCII case-insensitive).
    pub fn is_episode_url(&self, url: &str) -> bool {
        starts_with_ignore_case(url, &self.episode_prefix)
    }

    /// Fail with `InvalidUrl` unless `url` is a series URL.
    pub fn require_series_url(&self, url: &str) -> Result<()> {
        if self.is_series_url(url) {
            Ok(())
        } else {
            Err(KdramaError::InvalidUrl(format!(
                "{} (expected prefix {})",
                url, self.series_prefix
            )))
        }
    }

    /// Fail with `InvalidUrl` unless `url` is an episode URL.
    pub fn require_episode_url(&self, url: &str) -> Result<()> {
        if self.is_episode_url(url) {
            Ok(())
        } else {
            Err(KdramaError::InvalidUrl(format!(
                "{} (expected prefix {})",
                url, self.episode_prefix
            )))
        }
    }

    /// Build the URL of episode `number` of the show identified by `slug`.
    pub fn episode_url(&self, slug: &str, number: u32) -> String {
        format!("{}{}-ep-{}/", self.episode_prefix, slug, number)
    }
}

/// Extract the show slug from a canonical series URL.
///
/// Canonical series URLs end with a slash, so the slug is the segment before
/// the trailing empty one. Query strings and fragments are ignored.
///
/// # Examples
/// ```
/// use kdramahood_core::site::slug_from_series_url;
///
/// assert_eq!(
///     slug_from_series_url("https://kdramahood.com/dh/itaewon/"),
///     Some("itaewon".to_string())
/// );
/// assert_eq!(slug_from_series_url("https://kdramahood.com/"), None);
/// ```
pub fn slug_from_series_url(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let slug = parsed
        .path_segments()?
        .rfind(|segment| !segment.is_empty())?;
    Some(slug.to_string())
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
