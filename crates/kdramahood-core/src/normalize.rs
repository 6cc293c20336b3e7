//! Value and URL normalization
//!
//! Helpers that turn raw node text into [`FieldValue`]s and clean up URLs
//! recovered from the page.

use crate::types::FieldValue;

/// Split comma-delimited text into a scalar or a list.
///
/// Parts are trimmed and empty parts dropped. Returns `None` when nothing
/// remains, so callers never store empty values.
///
/// # Examples
/// ```
/// use kdramahood_core::normalize::split_values;
/// use kdramahood_core::FieldValue;
///
/// assert_eq!(split_values("Drama"), Some(FieldValue::Scalar("Drama".into())));
/// assert_eq!(
///     split_values("Drama, Romance"),
///     Some(FieldValue::List(vec!["Drama".into(), "Romance".into()]))
/// );
/// assert_eq!(split_values(" , "), None);
/// ```
pub fn split_values(text: &str) -> Option<FieldValue> {
    let mut parts: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    match parts.len() {
        0 => None,
        1 => parts.pop().map(FieldValue::Scalar),
        _ => Some(FieldValue::List(parts)),
    }
}

/// Strip tracking suffixes from a streaming URL.
///
/// URLs carrying `&title` are cut at the first `&`; otherwise URLs carrying
/// `?caption` are cut at the first `?`.
///
/// # Examples
/// ```
/// use kdramahood_core::normalize::normalize_stream_url;
///
/// assert_eq!(normalize_stream_url("https://x/y?id=1&title=foo"), "https://x/y?id=1");
/// assert_eq!(normalize_stream_url("https://x/y?caption=bar"), "https://x/y");
/// assert_eq!(normalize_stream_url("https://x/y?id=2"), "https://x/y?id=2");
/// ```
pub fn normalize_stream_url(url: &str) -> String {
    if url.contains("&title") {
        return cut_at(url, '&');
    }
    if url.contains("?caption") {
        return cut_at(url, '?');
    }
    url.to_string()
}

/// Qualify a URL that lacks an http(s) scheme with `https:`.
///
/// Scheme-relative sources (`//host/path`) become `https://host/path`.
pub fn with_https_scheme(url: &str) -> String {
    let lower = url.get(..6).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("https:") => url.to_string(),
        Some(head) if head.starts_with("http:") => url.to_string(),
        _ => format!("https:{}", url),
    }
}

/// Trim text, returning `None` when it is empty.
pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn cut_at(url: &str, delimiter: char) -> String {
    url.split(delimiter).next().unwrap_or(url).to_string()
}
