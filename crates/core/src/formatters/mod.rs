//! Report formatters for batch results.
//!
//! The report sink consumes one row per surviving fragment plus a
//! batch-level summary. [`fragment_rows`] flattens a page result into that
//! row shape; the `text` and `json` formatters render complete reports.

pub mod json;
pub mod text;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::fragment::FragmentKind;
use crate::job::PageResult;

pub use json::{JsonConfig, JsonFormatter, convert_to_json};
pub use text::{TextConfig, TextFormatter, convert_to_text};

/// One report row per extracted fragment.
#[derive(Debug, Clone, Serialize)]
pub struct FragmentRow {
    /// One-based row number within the page.
    pub index: usize,
    /// Fragment classification.
    pub kind: FragmentKind,
    /// Source tag name.
    pub tag: String,
    /// Original extracted text.
    pub text: String,
    /// Translations keyed by target language code.
    pub translations: BTreeMap<String, String>,
}

/// Flattens a page result into ordered report rows.
pub fn fragment_rows(result: &PageResult) -> Vec<FragmentRow> {
    result
        .fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| FragmentRow {
            index: i + 1,
            kind: fragment.kind,
            tag: fragment.tag.clone(),
            text: fragment.text.clone(),
            translations: result.translations.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}
