//! Series page parser for KdramaHood
//!
//! Parses a series page into a [`SeriesRecord`] and resolves the last
//! uploaded episode number.

use scraper::Html;
use tracing::debug;

use super::rules::{INFO_PATH, LAST_EPISODE_PATH, SERIES_EXTRAS, TITLE_PATH};
use super::tree::TreeNode;
use crate::error::{KdramaError, Result};
use crate::normalize::{non_empty, split_values};
use crate::types::{FieldValue, SeriesRecord, DESCRIPTION, ENGLISH_NAME};

/// Class of a labeled metadata entry inside the info container
const METADATA_CLASS: &str = "metadatac";

/// Class of the description block inside the info container
const DESCRIPTION_CLASS: &str = "contenidotv";

/// Parse a series record from series page HTML.
///
/// Missing nodes only leave their fields out; this never fails.
pub fn parse_series_record(html: &str) -> SeriesRecord {
    let document = Html::parse_document(html);
    extract_series_record(&document.root_element())
}

/// Resolve the last uploaded episode number from series page HTML.
///
/// # Returns
/// * `Ok(0)` if the page has no last-episode marker
/// * `Ok(n)` if the marker text is an integer
/// * `Err(KdramaError::ParseFailure)` otherwise
pub fn parse_last_uploaded_episode(html: &str) -> Result<u32> {
    let document = Html::parse_document(html);
    extract_last_uploaded_episode(&document.root_element())
}

/// Apply the series rule set to a document root.
pub fn extract_series_record<N: TreeNode>(root: &N) -> SeriesRecord {
    let mut record = SeriesRecord::new();

    if let Some(title) = root.select_first(TITLE_PATH) {
        if let Some(name) = non_empty(&title.text_content()) {
            record.insert(ENGLISH_NAME, FieldValue::Scalar(name));
        }
    }

    if let Some(info) = root.select_first(INFO_PATH) {
        for entry in info.element_children() {
            match entry.attribute("class") {
                Some(METADATA_CLASS) => {
                    if let Some((key, value)) = extract_metadata_entry(&entry) {
                        record.insert(key, value);
                    }
                }
                Some(DESCRIPTION_CLASS) => {
                    if let Some(description) = extract_description(&entry) {
                        record.insert(DESCRIPTION, FieldValue::Scalar(description));
                    }
                }
                _ => {}
            }
        }
    }

    for rule in &SERIES_EXTRAS {
        if let Some(value) = rule.apply(root) {
            record.insert(rule.key, value);
        }
    }

    debug!(fields = record.len(), "series record extracted");
    record
}

/// Locate the last-episode marker and parse it.
pub fn extract_last_uploaded_episode<N: TreeNode>(root: &N) -> Result<u32> {
    let Some(marker) = root.select_first(LAST_EPISODE_PATH) else {
        return Ok(0);
    };

    let text = marker.trimmed_text();
    text.parse::<u32>().map_err(|_| {
        KdramaError::ParseFailure(format!("last uploaded episode marker '{}' is not a number", text))
    })
}

/// Read one labeled entry: `<b>` label followed by `<span>` or `<a>` values.
fn extract_metadata_entry<N: TreeNode>(entry: &N) -> Option<(String, FieldValue)> {
    let label = entry.children_named("b").into_iter().next()?;
    let key = non_empty(&label.text_content())?;

    let spans = entry.children_named("span");
    let anchors = entry.children_named("a");

    let value = if spans.len() > 1 {
        FieldValue::List(spans.iter().map(TreeNode::trimmed_text).collect())
    } else if anchors.len() > 1 {
        FieldValue::List(anchors.iter().map(TreeNode::trimmed_text).collect())
    } else if let Some(single) = spans.first().or(anchors.first()) {
        split_values(&single.trimmed_text())?
    } else {
        return None;
    };

    Some((key, value))
}

/// Read the description paragraph; paragraphs carrying attributes are skipped.
fn extract_description<N: TreeNode>(block: &N) -> Option<String> {
    let paragraph = block
        .children_named("div")
        .into_iter()
        .flat_map(|div| div.children_named("p"))
        .next()?;

    if paragraph.has_attributes() {
        return None;
    }
    non_empty(&paragraph.text_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IMAGE, LAST_UPLOADED_EPISODE, TOTAL_EPISODES, TRAILER};

    const SERIES_PAGE: &str = r#"
        <html>
        <body>
            <div id="fixar">
                <div><img src=" https://img.kdramahood.com/itaewon.jpg "></div>
                <div>rating</div>
                <div><span>Episodes:</span><span><i> 16 </i></span></div>
            </div>
            <div id="seasons">
                <div>
                    <div><span>Title</span><span> Itaewon Class </span></div>
                    <div>
                        <ul>
                            <li><div> 16 </div><div>Episode 16</div></li>
                            <li><div>15</div></li>
                        </ul>
                    </div>
                </div>
            </div>
            <div id="info">
                <div class="metadatac"><b>Genre:</b><span>Drama</span><span>Romance</span></div>
                <div class="metadatac"><b>Cast:</b><a href="/c/1">Park Seo-joon</a><a href="/c/2">Kim Da-mi</a></div>
                <div class="metadatac"><b>Country:</b><span>South Korea</span></div>
                <div class="metadatac"><b>Also Known As:</b><span>Itaewon Keullasseu, Itaewon Class</span></div>
                <div class="metadatac"><b>Network:</b><a href="/n/jtbc">JTBC</a></div>
                <div class="metadatac"><b>Empty:</b></div>
                <div class="other"><b>Ignored:</b><span>x</span></div>
                <div class="contenidotv"><div><p> An ex-con opens a bar. </p></div></div>
            </div>
            <div id="trailer"><div><iframe src="//www.youtube.com/embed/abc"></iframe></div></div>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_series_record_full() {
        let record = parse_series_record(SERIES_PAGE);

        assert_eq!(record.english_name(), Some("Itaewon Class"));
        assert_eq!(
            record.get("Genre:"),
            Some(&FieldValue::List(vec!["Drama".to_string(), "Romance".to_string()]))
        );
        assert_eq!(
            record.get("Cast:"),
            Some(&FieldValue::List(vec![
                "Park Seo-joon".to_string(),
                "Kim Da-mi".to_string()
            ]))
        );
        assert_eq!(
            record.get("Country:"),
            Some(&FieldValue::Scalar("South Korea".to_string()))
        );
        assert_eq!(
            record.get("Also Known As:"),
            Some(&FieldValue::List(vec![
                "Itaewon Keullasseu".to_string(),
                "Itaewon Class".to_string()
            ]))
        );
        assert_eq!(
            record.get("Network:"),
            Some(&FieldValue::Scalar("JTBC".to_string()))
        );
        assert_eq!(record.description(), Some("An ex-con opens a bar."));
        assert_eq!(record.get(TOTAL_EPISODES), Some(&FieldValue::Count(16)));
        assert_eq!(record.get(LAST_UPLOADED_EPISODE), Some(&FieldValue::Count(16)));
        assert_eq!(
            record.get(TRAILER),
            Some(&FieldValue::Scalar("https://www.youtube.com/embed/abc".to_string()))
        );
        assert_eq!(
            record.get(IMAGE),
            Some(&FieldValue::Scalar("https://img.kdramahood.com/itaewon.jpg".to_string()))
        );
    }

    #[test]
    fn test_parse_series_record_skips_unlabeled_and_foreign_entries() {
        let record = parse_series_record(SERIES_PAGE);
        assert!(!record.contains_key("Empty:"));
        assert!(!record.contains_key("Ignored:"));
    }

    #[test]
    fn test_parse_series_record_field_order() {
        let record = parse_series_record(SERIES_PAGE);
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"English Name"));
        assert_eq!(keys.last(), Some(&"Image"));
    }

    #[test]
    fn test_description_with_attributes_is_skipped() {
        let html = r#"<html><body><div id="info">
            <div class="contenidotv"><div><p class="note">Coming soon</p></div></div>
        </div></body></html>"#;
        let record = parse_series_record(html);
        assert!(record.description().is_none());
    }

    #[test]
    fn test_parse_series_record_minimal() {
        let record = parse_series_record("<html><body><h1>Nothing here</h1></body></html>");
        assert!(record.is_empty());
    }

    #[test]
    fn test_last_uploaded_episode() {
        assert_eq!(parse_last_uploaded_episode(SERIES_PAGE).unwrap(), 16);
    }

    #[test]
    fn test_last_uploaded_episode_missing_marker_is_zero() {
        assert_eq!(
            parse_last_uploaded_episode("<html><body></body></html>").unwrap(),
            0
        );
    }

    #[test]
    fn test_last_uploaded_episode_not_a_number() {
        let html = r#"<html><body><div id="seasons"><div><div></div><div><ul><li><div>Soon</div></li></ul></div></div></div></body></html>"#;
        match parse_last_uploaded_episode(html) {
            Err(KdramaError::ParseFailure(msg)) => assert!(msg.contains("Soon")),
            other => panic!("Expected ParseFailure, got {:?}", other),
        }
    }
}
