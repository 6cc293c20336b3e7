//! Error types for KdramaHood extraction
//!
//! Every extractor returns a [`Result`] carrying one of the variants below.
//! KdramaError implements Serialize so frontends can emit it as plain text.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for KdramaHood extraction operations
#[derive(Error, Debug)]
pub enum KdramaError {
    /// URL does not start with the expected site prefix
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport error or non-success HTTP status
    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    /// A located node could not be converted to the required type
    #[error("Failed to parse page: {0}")]
    ParseFailure(String),

    /// Episode page yielded neither streaming nor fallback links
    #[error("No episode links found: {0}")]
    NoLinksFound(String),

    /// Requested episode range is empty after clamping
    #[error(
        "Episodes range ({from}, {to}) is out of bound, consider passing just the serie URL or this range (1, {last})"
    )]
    RangeOutOfBounds {
        /// Clamped lower bound
        from: u32,
        /// Clamped upper bound
        to: u32,
        /// Last uploaded episode of the series
        last: u32,
    },

    /// An episode inside a range extraction failed
    #[error("Failed to retrieve information for episode {episode}: {source}")]
    EpisodeFailed {
        /// Episode index that failed
        episode: u32,
        /// Underlying failure
        #[source]
        source: Box<KdramaError>,
    },
}

impl KdramaError {
    /// Wrap an episode failure with the index it occurred at.
    pub fn for_episode(episode: u32, source: KdramaError) -> Self {
        KdramaError::EpisodeFailed {
            episode,
            source: Box::new(source),
        }
    }
}

impl From<reqwest::Error> for KdramaError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => KdramaError::FetchFailure(format!("HTTP status {}", status.as_u16())),
            None => KdramaError::FetchFailure(err.to_string()),
        }
    }
}

/// Serialize KdramaError as its display string
impl Serialize for KdramaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for KdramaHood extraction operations
pub type Result<T> = std::result::Result<T, KdramaError>;
