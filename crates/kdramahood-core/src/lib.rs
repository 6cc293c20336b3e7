//! KdramaHood Extraction Core Library
//!
//! This crate extracts structured records from KdramaHood pages by reading
//! fixed positions in the page tree and normalizing what it finds.
//!
//! # Features
//! - Series metadata (title, labeled metadata entries, description, counts,
//!   trailer and cover image)
//! - Episode streaming links recovered from the player script, plus the
//!   direct link and subtitles from the links panel
//! - Episode ranges walked in order, failing fast on the first bad episode

pub mod client;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod scraper;
pub mod site;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, FetchFuture, FetchedPage, HoodClient, PageFetcher};
pub use error::{KdramaError, Result};
pub use crate::scraper::{clamp_range, KdramaScraper};
pub use site::SiteLayout;
pub use types::{EpisodeRecord, FieldValue, SeriesEpisodes, SeriesRecord};
