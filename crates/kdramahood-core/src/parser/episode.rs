//! Episode page parser for KdramaHood
//!
//! Streaming sources are not present as markup: the player panel assigns them
//! from an inline script (`ifr_target.src = '...'`), so they are recovered by
//! scanning the script text. A links panel below the player adds a direct
//! `Link1` download and the subtitles file.

use std::collections::BTreeSet;

use scraper::Html;
use tracing::debug;

use super::tree::TreeNode;
use crate::error::{KdramaError, Result};
use crate::normalize::{normalize_stream_url, with_https_scheme};
use crate::types::EpisodeRecord;

/// Repeated streaming panels; the last one holds the player script
const STREAMING_PANELS_PATH: &str = "#streaming > div > div";

/// Entries of the links panel
const LINK_ENTRIES_PATH: &str = "#links > div > div > li";

/// Label of the direct-link entry
const DIRECT_LINK_LABEL: &str = "Link1";

/// Parse an episode record from episode page HTML.
///
/// # Arguments
/// * `html` - Raw HTML content of the episode page
/// * `url` - URL the page was requested from, used for the episode number
///
/// # Returns
/// * `Ok(EpisodeRecord)` with at least one link
/// * `Err(KdramaError::NoLinksFound)` if neither the player script nor the
///   links panel yields a link
pub fn parse_episode_record(html: &str, url: &str) -> Result<EpisodeRecord> {
    let document = Html::parse_document(html);
    extract_episode_record(&document.root_element(), url)
}

/// Apply the episode rule set to a document root.
pub fn extract_episode_record<N: TreeNode>(root: &N, url: &str) -> Result<EpisodeRecord> {
    let mut links = extract_streaming_links(root);

    let entries = root.select_all(LINK_ENTRIES_PATH);

    if let Some(anchor) = entries.first().and_then(entry_anchor) {
        if anchor.text_content() == DIRECT_LINK_LABEL {
            if let Some(href) = anchor.attribute("href") {
                links.insert(href.to_string());
            }
        }
    }

    let subtitles_link = entries
        .last()
        .and_then(entry_anchor)
        .and_then(|anchor| anchor.attribute("href").map(str::to_string));

    if links.is_empty() {
        return Err(KdramaError::NoLinksFound(url.to_string()));
    }

    let episode_number = parse_episode_number(url);
    debug!(
        episode = episode_number,
        links = links.len(),
        subtitles = subtitles_link.is_some(),
        "episode record extracted"
    );

    Ok(EpisodeRecord {
        episode_number,
        links,
        subtitles_link,
    })
}

/// Scan the last streaming panel's script for player source assignments.
pub fn extract_streaming_links<N: TreeNode>(root: &N) -> BTreeSet<String> {
    let Some(script) = root
        .select_last(STREAMING_PANELS_PATH)
        .and_then(|panel| panel.children_named("script").into_iter().next())
    else {
        return BTreeSet::new();
    };

    scan_player_sources(&script.text_content())
}

/// Find every `ifr_target.src = '<url>'` assignment in script source.
///
/// Each URL is qualified with `https:` when needed and stripped of tracking
/// suffixes. Duplicates collapse.
///
/// # Examples
/// ```
/// use kdramahood_core::parser::scan_player_sources;
///
/// let script = "ifr_target.src = '//video.example/e/1?caption=x'; ifr_target.src='https://video.example/e/1';";
/// let links = scan_player_sources(script);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains("https://video.example/e/1"));
/// ```
pub fn scan_player_sources(script: &str) -> BTreeSet<String> {
    let Ok(re) = regex_lite::Regex::new(r"ifr_target\.src\s*=\s*'([^']+)'") else {
        return BTreeSet::new();
    };

    re.captures_iter(script)
        .filter_map(|caps| caps.get(1))
        .map(|source| normalize_stream_url(&with_https_scheme(source.as_str())))
        .collect()
}

/// Parse the episode number from a `-ep-<digits>` URL suffix.
///
/// # Returns
/// The episode number, or `-1` if the URL carries none.
///
/// # Examples
/// ```
/// use kdramahood_core::parser::parse_episode_number;
///
/// assert_eq!(parse_episode_number("https://kdramahood.com/nt/drama-ep-10/"), 10);
/// assert_eq!(parse_episode_number("https://kdramahood.com/nt/drama/"), -1);
/// ```
pub fn parse_episode_number(url: &str) -> i32 {
    let Ok(re) = regex_lite::Regex::new(r"-ep-(\d+)") else {
        return -1;
    };

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(-1)
}

fn entry_anchor<N: TreeNode>(entry: &N) -> Option<N> {
    entry.children_named("a").into_iter().next()
}
