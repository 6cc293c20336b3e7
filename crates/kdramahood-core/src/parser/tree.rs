//! Minimal document-tree query capability
//!
//! Extraction rules only need to select nodes by structural path, walk
//! element children and read text or attributes. [`TreeNode`]
//! captures exactly that so rules do not depend on a particular HTML library.

use scraper::{ElementRef, Selector};

/// Read-only view of an element in a parsed document.
pub trait TreeNode: Sized {
    /// All descendants matching a CSS path, in document order.
    ///
    /// An unparsable path matches nothing.
    fn select_all(&self, path: &str) -> Vec<Self>;

    /// Element children, in document order.
    fn element_children(&self) -> Vec<Self>;

    /// Lowercase tag name.
    fn tag(&self) -> &str;

    /// Concatenated text of all descendant text nodes.
    ///
    /// For `script` elements this is the unescaped script source.
    fn text_content(&self) -> String;

    /// Attribute value by name.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Whether the element carries any attribute.
    fn has_attributes(&self) -> bool;

    /// First descendant matching `path`.
    fn select_first(&self, path: &str) -> Option<Self> {
        self.select_all(path).into_iter().next()
    }

    /// Last descendant matching `path`.
    fn select_last(&self, path: &str) -> Option<Self> {
        self.select_all(path).pop()
    }

    /// Element children with the given tag name.
    fn children_named(&self, tag: &str) -> Vec<Self> {
        self.element_children()
            .into_iter()
            .filter(|child| child.tag() == tag)
            .collect()
    }

    /// Trimmed text content.
    fn trimmed_text(&self) -> String {
        self.text_content().trim().to_string()
    }

    /// Attribute value or `default` when absent.
    fn attribute_or<'s>(&'s self, name: &str, default: &'s str) -> &'s str {
        self.attribute(name).unwrap_or(default)
    }
}

impl<'a> TreeNode for ElementRef<'a> {
    fn select_all(&self, path: &str) -> Vec<Self> {
        match Selector::parse(path) {
            Ok(selector) => self.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn element_children(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn tag(&self) -> &str {
        self.value().name()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn has_attributes(&self) -> bool {
        self.value().attrs().next().is_some()
    }
}
