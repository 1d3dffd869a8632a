//! Text fragment type with classification and normalization.
//!
//! This module defines the [`TextFragment`] struct, the unit of extracted
//! text produced by the fragment extractor, and the whitespace
//! normalization applied to every candidate before deduplication.

use serde::Serialize;

/// Classification of an extracted text fragment.
///
/// Headings are deduplicated by exact text only; content fragments from
/// block-level elements additionally participate in containment
/// deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Text taken from a heading element (h1-h6).
    Heading,
    /// Body text: paragraphs, list items, table cells, inline elements,
    /// and raw text nodes.
    Content,
}

/// One unit of extracted, deduplicated text.
///
/// Fragments are immutable once created. Their order in the extractor's
/// output is the pre-order document position at which each surviving
/// fragment was finally inserted.
///
/// # Example
///
/// ```rust
/// use transfero_core::fragment::{FragmentKind, TextFragment};
///
/// let fragment = TextFragment::heading("h1", "Annual Report");
/// assert_eq!(fragment.kind, FragmentKind::Heading);
/// assert_eq!(fragment.tag, "h1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextFragment {
    /// Fragment classification.
    pub kind: FragmentKind,

    /// Source tag name (e.g. "p", "h2"); `"text"` for raw text nodes.
    pub tag: String,

    /// Normalized text content.
    pub text: String,
}

impl TextFragment {
    /// Creates a heading fragment.
    pub fn heading(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self { kind: FragmentKind::Heading, tag: tag.into(), text: text.into() }
    }

    /// Creates a content fragment.
    pub fn content(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self { kind: FragmentKind::Content, tag: tag.into(), text: text.into() }
    }

    /// Number of characters in the fragment text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Normalizes raw text: collapses internal whitespace runs (including
/// newlines and tabs) to single spaces and trims the ends.
///
/// # Example
///
/// ```rust
/// use transfero_core::fragment::normalize_text;
///
/// assert_eq!(normalize_text("  hello\n\t world  "), "hello world");
/// ```
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
