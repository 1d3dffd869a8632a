//! URL list input sources.
//!
//! Batches are seeded from a URL list supplied as line-delimited text
//! (`#` comments ignored), JSON (an array of URL strings, an array of
//! objects carrying a `url` field, or an object with a `urls` array), or
//! CSV (first column). Bare hostnames are normalized by prefixing the
//! default `https://` scheme.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{Result, TransferoError};

/// Lines starting with this marker are ignored in text and CSV sources.
const COMMENT_MARKER: char = '#';

/// Reads a URL list from a file.
///
/// The format is chosen by file extension: `.json` and `.csv` are parsed
/// structurally, anything else is treated as line-delimited text.
pub fn read_urls_from_path(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(TransferoError::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let urls = match extension.as_str() {
        "json" => parse_url_json(&content)?,
        "csv" => parse_url_csv(&content),
        _ => parse_url_lines(&content),
    };

    tracing::debug!(path = %path.display(), urls = urls.len(), "read URL source");
    Ok(urls)
}

/// Normalizes one raw URL entry.
///
/// Trims surrounding whitespace, drops empty entries, and prefixes bare
/// hostnames with `https://`. The URL itself is not validated; invalid
/// URLs surface later as per-job fetch failures.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

/// Parses a line-delimited URL list, skipping blank lines and comments.
pub fn parse_url_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .filter_map(normalize_url)
        .collect()
}

/// Parses the first column of a CSV document as a URL list.
///
/// Blank cells, comments, and a `url` header cell are skipped.
pub fn parse_url_csv(input: &str) -> Vec<String> {
    input
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(str::trim)
        .filter(|cell| {
            !cell.is_empty() && !cell.starts_with(COMMENT_MARKER) && !cell.eq_ignore_ascii_case("url")
        })
        .filter_map(normalize_url)
        .collect()
}

/// Parses a JSON URL source.
///
/// Accepted shapes: `["https://a", ...]`, `[{"url": "https://a"}, ...]`,
/// or `{"urls": [...]}`. Entries without a usable URL are skipped.
pub fn parse_url_json(input: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| TransferoError::SourceError(format!("invalid JSON: {}", e)))?;

    let entries = match &value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("urls").and_then(Value::as_array) {
            Some(items) => items.as_slice(),
            None => {
                return Err(TransferoError::SourceError(
                    "expected an array of URLs or an object with a \"urls\" field".to_string(),
                ));
            }
        },
        _ => {
            return Err(TransferoError::SourceError(
                "expected an array of URLs or an object with a \"urls\" field".to_string(),
            ));
        }
    };

    let urls = entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("url").and_then(Value::as_str),
            _ => None,
        })
        .filter_map(normalize_url)
        .collect();

    Ok(urls)
}
