//! Data types for KdramaHood extraction
//!
//! Records are built once from a single fetched page and never mutated after
//! they are returned. All of them serialize to the JSON shape consumers expect
//! (`"English Name"`, `"Ep Number"`, `"Links"`, `"SubtitlesLink"`, ...).

use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Key of the English title field
pub const ENGLISH_NAME: &str = "English Name";
/// Key of the description field
pub const DESCRIPTION: &str = "description";
/// Key of the total episode count field
pub const TOTAL_EPISODES: &str = "Total Episodes";
/// Key of the last uploaded episode field
pub const LAST_UPLOADED_EPISODE: &str = "Last Uploaded Episode";
/// Key of the trailer URL field
pub const TRAILER: &str = "Trailer";
/// Key of the cover image URL field
pub const IMAGE: &str = "Image";

/// Value of a single series field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Single text value
    Scalar(String),
    /// Ordered list of text values
    List(Vec<String>),
    /// Integer value, e.g. an episode count
    Count(u32),
}

impl FieldValue {
    /// Scalar text, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// List items, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// Integer value, if this is a count.
    pub fn as_count(&self) -> Option<u32> {
        match self {
            FieldValue::Count(value) => Some(*value),
            _ => None,
        }
    }
}

/// Series metadata keyed by field name.
///
/// Keeps the order in which fields were discovered on the page. Absent source
/// nodes simply leave the key out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesRecord {
    fields: Vec<(String, FieldValue)>,
}

impl SeriesRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing an existing value under the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Whether the record has a field under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over fields in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of populated fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was populated
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// English display name
    pub fn english_name(&self) -> Option<&str> {
        self.get(ENGLISH_NAME).and_then(FieldValue::as_scalar)
    }

    /// Series description
    pub fn description(&self) -> Option<&str> {
        self.get(DESCRIPTION).and_then(FieldValue::as_scalar)
    }

    /// Last uploaded episode number, when the page reports a numeric one
    pub fn last_uploaded_episode(&self) -> Option<u32> {
        self.get(LAST_UPLOADED_EPISODE).and_then(FieldValue::as_count)
    }
}

impl Serialize for SeriesRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Streaming links of a single episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode number parsed from the page URL, -1 when the URL has none
    #[serde(rename = "Ep Number")]
    pub episode_number: i32,
    /// Deduplicated absolute streaming URLs, never empty
    #[serde(rename = "Links")]
    pub links: BTreeSet<String>,
    /// Subtitles download URL
    #[serde(
        rename = "SubtitlesLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitles_link: Option<String>,
}

/// Episodes of a series in ascending episode order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesEpisodes {
    /// One record per episode of the requested range
    #[serde(rename = "Episodes")]
    pub episodes: Vec<EpisodeRecord>,
}

impl SeriesEpisodes {
    /// Number of episodes in the result
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Whether the result holds no episode
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_serialization() {
        let scalar = FieldValue::Scalar("Drama".to_string());
        assert_eq!(serde_json::to_string(&scalar).unwrap(), "\"Drama\"");

        let list = FieldValue::List(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(serde_json::to_string(&list).unwrap(), "[\"A\",\"B\"]");

        let count = FieldValue::Count(16);
        assert_eq!(serde_json::to_string(&count).unwrap(), "16");
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Scalar("x".to_string()).as_scalar(), Some("x"));
        assert_eq!(FieldValue::Count(3).as_count(), Some(3));
        assert!(FieldValue::Count(3).as_list().is_none());
    }

    #[test]
    fn test_series_record_keeps_insertion_order() {
        let mut record = SeriesRecord::new();
        record.insert(ENGLISH_NAME, FieldValue::Scalar("Itaewon Class".to_string()));
        record.insert("Genre", FieldValue::List(vec!["Drama".to_string()]));
        record.insert(TOTAL_EPISODES, FieldValue::Count(16));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"English Name":"Itaewon Class","Genre":["Drama"],"Total Episodes":16}"#
        );
    }

    #[test]
    fn test_series_record_insert_replaces_in_place() {
        let mut record = SeriesRecord::new();
        record.insert("a", FieldValue::Scalar("1".to_string()));
        record.insert("b", FieldValue::Scalar("2".to_string()));
        record.insert("a", FieldValue::Scalar("3".to_string()));

        assert_eq!(record.len(), 2);
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&FieldValue::Scalar("3".to_string())));
    }

    #[test]
    fn test_series_record_accessors() {
        let mut record = SeriesRecord::new();
        assert!(record.is_empty());
        record.insert(LAST_UPLOADED_EPISODE, FieldValue::Count(12));
        record.insert(DESCRIPTION, FieldValue::Scalar("A story".to_string()));

        assert_eq!(record.last_uploaded_episode(), Some(12));
        assert_eq!(record.description(), Some("A story"));
        assert_eq!(record.english_name(), None);
    }

    #[test]
    fn test_episode_record_serialization() {
        let episode = EpisodeRecord {
            episode_number: 1,
            links: ["https://a/1".to_string()].into_iter().collect(),
            subtitles_link: None,
        };

        let json = serde_json::to_string(&episode).unwrap();
        assert_eq!(json, r#"{"Ep Number":1,"Links":["https://a/1"]}"#);

        let deserialized: EpisodeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, episode);
    }

    #[test]
    fn test_series_episodes_serialization() {
        let result = SeriesEpisodes {
            episodes: vec![EpisodeRecord {
                episode_number: 2,
                links: ["https://a/2".to_string()].into_iter().collect(),
                subtitles_link: Some("https://subs/2.srt".to_string()),
            }],
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.starts_with(r#"{"Episodes":[{"Ep Number":2"#));
        assert!(json.contains(r#""SubtitlesLink":"https://subs/2.srt""#));
        assert_eq!(result.len(), 1);
    }
}
