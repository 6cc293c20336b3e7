//! HTML parsers for KdramaHood pages
//!
//! This module contains the rule sets applied to fetched pages:
//! - `tree`: Minimal document query capability the rules are written against
//! - `rules`: Declarative single-node field rules and page positions
//! - `series`: Parse series metadata and the last uploaded episode
//! - `episode`: Parse episode streaming links and subtitles

pub mod episode;
pub mod rules;
pub mod series;
pub mod tree;

// Re-export main parsing functions
pub use episode::{parse_episode_number, parse_episode_record, scan_player_sources};
pub use rules::{FieldRule, Normalize, Read, SERIES_EXTRAS};
pub use series::{parse_last_uploaded_episode, parse_series_record};
pub use tree::TreeNode;
