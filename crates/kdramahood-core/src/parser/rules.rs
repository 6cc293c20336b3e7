//! Declarative field rules
//!
//! A [`FieldRule`] binds a field key to a fixed position in the page and says
//! how the located node becomes a [`FieldValue`]. Rules are evaluated
//! independently; a rule whose node is missing or whose value comes out empty
//! leaves its key out of the record.

use tracing::trace;

use super::tree::TreeNode;
use crate::normalize::{non_empty, with_https_scheme};
use crate::types::{FieldValue, IMAGE, LAST_UPLOADED_EPISODE, TOTAL_EPISODES, TRAILER};

/// What to read from the located node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// Text content of the node
    Text,
    /// Value of the named attribute
    Attribute(&'static str),
}

/// How the raw value is turned into a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    /// Trimmed text as a scalar
    Trim,
    /// Integer when the trimmed text parses, scalar text otherwise
    Count,
    /// Trimmed URL; scheme-relative sources get `https:`
    SchemeRelative,
}

/// A single field-level extraction rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Key the value is stored under
    pub key: &'static str,
    /// CSS path of the node, evaluated from the document root
    pub path: &'static str,
    /// What to read from the node
    pub read: Read,
    /// Normalization applied to the read value
    pub normalize: Normalize,
}

/// Display name position on a series page
pub const TITLE_PATH: &str = "#seasons > div > div:nth-of-type(1) > span:nth-of-type(2)";

/// Container of the labeled metadata entries and the description
pub const INFO_PATH: &str = "#info";

/// Last uploaded episode marker on a series page
pub const LAST_EPISODE_PATH: &str =
    "#seasons > div > div:nth-of-type(2) > ul > li:nth-of-type(1) > div:nth-of-type(1)";

/// Optional single-node fields of a series page, applied in order.
pub const SERIES_EXTRAS: [FieldRule; 4] = [
    FieldRule {
        key: TOTAL_EPISODES,
        path: "#fixar > div:nth-of-type(3) > span:nth-of-type(2) > i",
        read: Read::Text,
        normalize: Normalize::Count,
    },
    FieldRule {
        key: LAST_UPLOADED_EPISODE,
        path: LAST_EPISODE_PATH,
        read: Read::Text,
        normalize: Normalize::Count,
    },
    FieldRule {
        key: TRAILER,
        path: "#trailer > div:nth-of-type(1) > iframe",
        read: Read::Attribute("src"),
        normalize: Normalize::SchemeRelative,
    },
    FieldRule {
        key: IMAGE,
        path: "#fixar > div:nth-of-type(1) > img",
        read: Read::Attribute("src"),
        normalize: Normalize::Trim,
    },
];

impl FieldRule {
    /// Evaluate the rule against the document root.
    pub fn apply<N: TreeNode>(&self, root: &N) -> Option<FieldValue> {
        let node = root.select_first(self.path)?;
        let raw = match self.read {
            Read::Text => node.text_content(),
            Read::Attribute(name) => node.attribute(name)?.to_string(),
        };
        let value = self.normalize.apply(&raw);
        trace!(key = self.key, found = value.is_some(), "field rule evaluated");
        value
    }
}

impl Normalize {
    /// Normalize a raw value, `None` when it is empty.
    pub fn apply(&self, raw: &str) -> Option<FieldValue> {
        let text = non_empty(raw)?;
        let value = match self {
            Normalize::Trim => FieldValue::Scalar(text),
            Normalize::Count => match text.parse::<u32>() {
                Ok(count) => FieldValue::Count(count),
                Err(_) => FieldValue::Scalar(text),
            },
            Normalize::SchemeRelative => FieldValue::Scalar(with_https_scheme(&text)),
        };
        Some(value)
    }
}
