//! Fragment extraction from parsed HTML documents.
//!
//! This module walks a parsed [`Document`] in pre-order and produces an
//! ordered, deduplicated sequence of [`TextFragment`]s. The walk is a pure
//! function of the tree: no I/O, deterministic for a fixed input.
//!
//! The traversal is an explicit stack rather than recursion, so deep or
//! malformed trees cannot exhaust the call stack, and the
//! replace-on-containment step is an explicit operation on a dedup ledger
//! rather than in-place list surgery during iteration.
//!
//! # Example
//!
//! ```rust
//! use transfero_core::{Document, ExtractConfig, extract_fragments};
//!
//! let html = "<body><h1>Title</h1><p>A paragraph of body text.</p></body>";
//! let doc = Document::parse(html).unwrap();
//! let fragments = extract_fragments(&doc, &ExtractConfig::default());
//!
//! assert_eq!(fragments.len(), 2);
//! assert_eq!(fragments[0].text, "Title");
//! ```

use std::collections::HashMap;

use scraper::ElementRef;
use scraper::Node;
use ego_tree::NodeRef;

use crate::fragment::{FragmentKind, TextFragment, normalize_text};
use crate::parse::Document;

/// Default ratio at which one text counts as a containment duplicate of
/// another. Preserved from the extraction heuristic this implements;
/// empirical, not derived.
pub const DEFAULT_CONTAINMENT_THRESHOLD: f64 = 0.9;

/// Tags whose entire subtree is pruned before traversal.
const INERT_TAGS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];

/// Heading tags, emitted as [`FragmentKind::Heading`] without recursing.
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Block-level content tags, subject to the full containment dedup rule.
const BLOCK_TAGS: &[&str] = &["p", "li", "td", "th", "blockquote", "pre"];

/// Inline tags, emitted with exact-text dedup only.
const INLINE_TAGS: &[&str] = &["span", "a", "strong", "b", "em", "i", "code", "label"];

/// Container tags: never emitted themselves, children are visited.
const CONTAINER_TAGS: &[&str] =
    &["div", "section", "article", "ul", "ol", "table", "tbody", "thead", "tr"];

/// Minimum character count for raw text, block, and inline fragments
/// (strictly greater-than).
const MIN_TEXT_CHARS: usize = 2;

/// Minimum character count for heading fragments (strictly greater-than).
const MIN_HEADING_CHARS: usize = 1;

/// Selectors tried in order to locate the content root of a page.
const ROOT_SELECTORS: &[&str] = &["main", "article", "[class*=\"content\"]", "[class*=\"main\"]", "body"];

/// Configuration for fragment extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Length ratio above which a substring match counts as a duplicate
    /// (default: 0.9).
    pub containment_threshold: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { containment_threshold: DEFAULT_CONTAINMENT_THRESHOLD }
    }
}

/// Outcome of offering a candidate fragment to the dedup ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    /// The candidate was new and appended.
    Inserted,
    /// The candidate duplicated a surviving fragment and was dropped.
    Duplicate,
    /// The candidate displaced a shorter surviving fragment and was appended.
    Replaced,
}

/// Ordered fragment list plus an index from normalized text to position.
///
/// The ledger enforces the dedup invariants: no two surviving fragments share
/// identical text, and no surviving Content fragment is a ≥threshold-length
/// substring of another. Removal preserves the relative order of the
/// remaining fragments.
struct DedupLedger {
    fragments: Vec<TextFragment>,
    positions: HashMap<String, usize>,
    threshold: f64,
}

impl DedupLedger {
    fn new(threshold: f64) -> Self {
        Self { fragments: Vec::new(), positions: HashMap::new(), threshold }
    }

    /// Admits a candidate checked against exact text matches only.
    ///
    /// Used for headings, inline fragments, and raw text nodes.
    fn admit_exact(&mut self, fragment: TextFragment) -> Admission {
        if self.positions.contains_key(&fragment.text) {
            return Admission::Duplicate;
        }
        self.push(fragment);
        Admission::Inserted
    }

    /// Admits a block-level candidate under the full containment rule.
    ///
    /// A candidate that equals or is a ≥threshold-length substring of a
    /// surviving Content fragment is dropped. Otherwise every survivor that
    /// is a ≥threshold-length substring of the candidate is removed, and the
    /// candidate takes the current traversal position, so no containment
    /// pair ever survives together. Headings are never compared and never
    /// displaced.
    fn admit_block(&mut self, fragment: TextFragment) -> Admission {
        if self.positions.contains_key(&fragment.text) {
            return Admission::Duplicate;
        }

        let candidate_len = fragment.text.chars().count() as f64;
        let mut displaced = Vec::new();

        for (pos, seen) in self.fragments.iter().enumerate() {
            if seen.kind != FragmentKind::Content {
                continue;
            }
            let seen_len = seen.text.chars().count() as f64;

            if seen.text.contains(&fragment.text) && candidate_len > seen_len * self.threshold {
                return Admission::Duplicate;
            }
            if fragment.text.contains(&seen.text) && seen_len > candidate_len * self.threshold {
                displaced.push(pos);
            }
        }

        if displaced.is_empty() {
            self.push(fragment);
            return Admission::Inserted;
        }

        for pos in displaced.into_iter().rev() {
            self.remove_at(pos);
        }
        self.push(fragment);
        Admission::Replaced
    }

    fn push(&mut self, fragment: TextFragment) {
        self.positions.insert(fragment.text.clone(), self.fragments.len());
        self.fragments.push(fragment);
    }

    fn remove_at(&mut self, pos: usize) {
        let removed = self.fragments.remove(pos);
        self.positions.remove(&removed.text);
        for index in self.positions.values_mut() {
            if *index > pos {
                *index -= 1;
            }
        }
    }

    fn into_fragments(self) -> Vec<TextFragment> {
        self.fragments
    }
}

/// Extracts an ordered, deduplicated sequence of text fragments from a
/// document.
///
/// The walk starts at the page's content root (`main`, then `article`, then
/// an element with a content-like class, then `body`) and visits children in
/// document order. Inert subtrees (script, style, nav, header, footer,
/// aside) never enter the output. An empty or unparseable tree yields an
/// empty sequence, not an error.
pub fn extract_fragments(doc: &Document, config: &ExtractConfig) -> Vec<TextFragment> {
    let Some(root) = content_root(doc) else {
        return Vec::new();
    };

    let mut ledger = DedupLedger::new(config.containment_threshold);
    let mut stack: Vec<NodeRef<'_, Node>> = Vec::new();

    // Reverse-push so children pop in document order.
    for child in root.children().rev() {
        stack.push(child);
    }

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                visit_raw_text(&mut ledger, &text);
            }
            Node::Element(element) => {
                let tag = element.name();

                if INERT_TAGS.contains(&tag) {
                    continue;
                }

                if HEADING_TAGS.contains(&tag) {
                    visit_heading(&mut ledger, node, tag);
                } else if BLOCK_TAGS.contains(&tag) {
                    visit_block(&mut ledger, node, tag);
                } else if INLINE_TAGS.contains(&tag) {
                    visit_inline(&mut ledger, node, tag);
                } else if CONTAINER_TAGS.contains(&tag) {
                    for child in node.children().rev() {
                        stack.push(child);
                    }
                }
                // Unlisted tags are skipped entirely.
            }
            _ => {}
        }
    }

    ledger.into_fragments()
}

/// Locates the element the walk starts from.
fn content_root(doc: &Document) -> Option<ElementRef<'_>> {
    for selector in ROOT_SELECTORS {
        if let Ok(elements) = doc.select(selector)
            && let Some(first) = elements.first()
        {
            return Some(first.element_ref());
        }
    }

    Some(doc.html().root_element())
}

/// Flattens the full text content of an element, normalized.
fn flattened_text(node: NodeRef<'_, Node>) -> Option<String> {
    let element = ElementRef::wrap(node)?;
    Some(normalize_text(&element.text().collect::<String>()))
}

fn visit_raw_text(ledger: &mut DedupLedger, text: &scraper::node::Text) {
    let normalized = normalize_text(&text.text);
    if normalized.chars().count() <= MIN_TEXT_CHARS {
        return;
    }
    // Reject near-empty runs: more than one non-space character required.
    if normalized.chars().filter(|c| *c != ' ').count() <= 1 {
        return;
    }
    ledger.admit_exact(TextFragment::content("text", normalized));
}

fn visit_heading(ledger: &mut DedupLedger, node: NodeRef<'_, Node>, tag: &str) {
    let Some(text) = flattened_text(node) else { return };
    if text.chars().count() <= MIN_HEADING_CHARS {
        return;
    }
    ledger.admit_exact(TextFragment::heading(tag, text));
}

fn visit_block(ledger: &mut DedupLedger, node: NodeRef<'_, Node>, tag: &str) {
    let Some(text) = flattened_text(node) else { return };
    if text.chars().count() <= MIN_TEXT_CHARS {
        return;
    }
    ledger.admit_block(TextFragment::content(tag, text));
}

fn visit_inline(ledger: &mut DedupLedger, node: NodeRef<'_, Node>, tag: &str) {
    let Some(text) = flattened_text(node) else { return };
    if text.chars().count() <= MIN_TEXT_CHARS {
        return;
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        return;
    }
    ledger.admit_exact(TextFragment::content(tag, text));
}
