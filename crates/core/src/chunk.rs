//! Size-bounded chunked translation of text fragments.
//!
//! Translation services reject or truncate oversized inputs, so fragments
//! above the size limit are split on sentence-terminal punctuation, greedily
//! re-accumulated into chunks under the limit, translated chunk by chunk in
//! order, and re-joined with single spaces.
//!
//! Translation failure never escapes this layer: if any chunk of a fragment
//! fails, the fragment's whole translated value for that language becomes a
//! placeholder embedding a prefix of the original text. Partial successes
//! are discarded rather than silently mixed with untranslated chunks.

use regex::Regex;

use crate::translate::Translator;

/// Default maximum characters per translation call. Preserved from the
/// protocol this implements; empirical, not derived.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 4000;

/// Number of original-text characters embedded in a failure placeholder.
const PLACEHOLDER_PREFIX_CHARS: usize = 50;

/// Sentence-terminal punctuation, Western and East-Asian.
const SENTENCE_TERMINATORS: &str = r"[.!?。！？]";

/// Configuration for chunked translation.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum characters submitted per translation call (default: 4000).
    pub max_chunk_chars: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self { max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS }
    }
}

/// Splits text into sentence-aligned chunks under `max_chunk_chars`.
///
/// Sentences are re-accumulated greedily and each is re-appended with a
/// trailing period. Empty pieces between consecutive terminators are
/// skipped. A single sentence longer than the limit becomes its own
/// oversized chunk; splitting mid-sentence would damage the translation
/// more than an oversized call does.
pub fn chunk_text(text: &str, max_chunk_chars: usize) -> Vec<String> {
    let terminators = Regex::new(SENTENCE_TERMINATORS).unwrap();

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in terminators.split(text) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        if char_len(&current) + char_len(sentence) < max_chunk_chars {
            current.push_str(sentence);
            current.push('.');
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current = format!("{}.", sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Translates one fragment's text into one target language.
///
/// Inputs at or under the size limit are submitted in a single call; longer
/// inputs go through [`chunk_text`] and one call per chunk, with the results
/// joined in chunk order by single spaces.
///
/// This function does not fail: any translation error yields the failure
/// placeholder for the entire fragment.
pub fn translate_fragment(
    translator: &dyn Translator,
    text: &str,
    target_lang: &str,
    config: &ChunkConfig,
) -> String {
    if char_len(text) <= config.max_chunk_chars {
        return match translator.translate(text, target_lang) {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(target_lang, error = %e, "translation failed");
                failure_placeholder(text)
            }
        };
    }

    let chunks = chunk_text(text, config.max_chunk_chars);
    tracing::debug!(target_lang, chunks = chunks.len(), "translating oversized fragment");

    let mut translated = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        match translator.translate(chunk, target_lang) {
            Ok(piece) => translated.push(piece),
            Err(e) => {
                tracing::warn!(target_lang, error = %e, "chunk translation failed, discarding fragment");
                return failure_placeholder(text);
            }
        }
    }

    translated.join(" ")
}

/// Builds the fixed placeholder reported when a fragment's translation
/// fails: `[translation failed: <first 50 chars of the original>...]`.
pub fn failure_placeholder(text: &str) -> String {
    let prefix: String = text.chars().take(PLACEHOLDER_PREFIX_CHARS).collect();
    format!("[translation failed: {}...]", prefix)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
