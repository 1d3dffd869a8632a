//! Per-page processing job: fetch, extract, translate.
//!
//! A [`PageJob`] couples one source URL to its extraction and translation
//! result. Expected failures (unreachable page, empty extraction) become a
//! `Failed` [`PageResult`]; translation failures degrade to placeholders
//! inside a `Success` result. Nothing escapes [`PageJob::run`] as an error —
//! the batch orchestrator additionally catches panics at its dispatch
//! boundary, so no single page can take down a batch.

use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::TransferoError;
use crate::chunk::{ChunkConfig, translate_fragment};
use crate::extract::{ExtractConfig, extract_fragments};
use crate::fetch::Fetcher;
use crate::fragment::TextFragment;
use crate::parse::Document;
use crate::translate::Translator;

/// Terminal status of a page job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Extraction produced fragments; translations may include placeholders.
    Success,
    /// The page could not be fetched, parsed, or yielded no fragments.
    Failed,
}

/// The complete result of processing one page.
///
/// A result is owned by the job that produced it until it is handed to the
/// batch orchestrator's shared summary, after which it is never mutated.
/// `url_index` retains the submission position so reports can present a
/// stable order regardless of completion order.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// Source page URL.
    pub url: String,

    /// Zero-based submission index within the batch.
    pub url_index: usize,

    /// Extracted fragments in document order.
    pub fragments: Vec<TextFragment>,

    /// Per-fragment translations keyed by target language code, indexed
    /// parallel to `fragments`.
    pub translations: Vec<BTreeMap<String, String>>,

    /// Terminal job status.
    pub status: JobStatus,

    /// Failure reason when `status` is `Failed`.
    pub error: Option<String>,

    /// Completion time of the job.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl PageResult {
    /// Creates a failed result for `url` with the given reason.
    pub(crate) fn failed(url: impl Into<String>, url_index: usize, reason: String) -> Self {
        Self {
            url: url.into(),
            url_index,
            fragments: Vec::new(),
            translations: Vec::new(),
            status: JobStatus::Failed,
            error: Some(reason),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Whether the job completed successfully.
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }

    /// Number of extracted fragments.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }
}

/// The unit of work processing one URL end-to-end.
#[derive(Debug, Clone)]
pub struct PageJob {
    /// Page URL to process.
    pub url: String,
    /// Zero-based submission index within the batch.
    pub url_index: usize,
}

impl PageJob {
    /// Creates a job for `url` at submission position `url_index`.
    pub fn new(url: impl Into<String>, url_index: usize) -> Self {
        Self { url: url.into(), url_index }
    }

    /// Runs the job to completion: fetch, extract, then translate every
    /// fragment into every requested language.
    ///
    /// Always returns a [`PageResult`]; expected failures are recorded in
    /// the result rather than raised.
    pub fn run(
        &self,
        fetcher: &dyn Fetcher,
        translator: &dyn Translator,
        languages: &[String],
        extract: &ExtractConfig,
        chunk: &ChunkConfig,
    ) -> PageResult {
        tracing::info!(url = %self.url, "processing page");

        let html = match fetcher.fetch(&self.url) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "fetch failed");
                return PageResult::failed(&self.url, self.url_index, e.to_string());
            }
        };

        let doc = match Document::parse(&html) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "parse failed");
                return PageResult::failed(&self.url, self.url_index, e.to_string());
            }
        };

        let fragments = extract_fragments(&doc, extract);
        if fragments.is_empty() {
            tracing::warn!(url = %self.url, "no fragments extracted");
            return PageResult::failed(
                &self.url,
                self.url_index,
                TransferoError::NoFragments.to_string(),
            );
        }

        let translations = fragments
            .iter()
            .map(|fragment| {
                languages
                    .iter()
                    .map(|lang| {
                        let translated = translate_fragment(translator, &fragment.text, lang, chunk);
                        (lang.clone(), translated)
                    })
                    .collect::<BTreeMap<_, _>>()
            })
            .collect();

        tracing::info!(url = %self.url, fragments = fragments.len(), "page processed");

        PageResult {
            url: self.url.clone(),
            url_index: self.url_index,
            fragments,
            translations,
            status: JobStatus::Success,
            error: None,
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    struct CannedFetcher {
        body: &'static str,
    }

    impl Fetcher for CannedFetcher {
        fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.body.to_string())
        }
    }

    struct BrokenFetcher;

    impl Fetcher for BrokenFetcher {
        fn fetch(&self, url: &str) -> Result<String> {
            Err(TransferoError::InvalidUrl(url.to_string()))
        }
    }

    struct EchoTranslator;

    impl Translator for EchoTranslator {
        fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
            Ok(format!("[{}] {}", target_lang, text))
        }
    }

    struct BrokenTranslator;

    impl Translator for BrokenTranslator {
        fn translate(&self, _text: &str, _target_lang: &str) -> Result<String> {
            Err(TransferoError::TranslationFailed("service down".to_string()))
        }
    }

    fn languages() -> Vec<String> {
        vec!["en".to_string(), "vi".to_string()]
    }

    const PAGE: &str = r#"
        <body>
            <h1>Page Title</h1>
            <p>First paragraph of page body.</p>
        </body>
    "#;

    #[test]
    fn test_successful_job_translates_every_fragment_and_language() {
        let job = PageJob::new("https://example.com", 0);
        let result = job.run(
            &CannedFetcher { body: PAGE },
            &EchoTranslator,
            &languages(),
            &ExtractConfig::default(),
            &ChunkConfig::default(),
        );

        assert_eq!(result.status, JobStatus::Success);
        assert!(result.error.is_none());
        assert_eq!(result.fragment_count(), 2);
        assert_eq!(result.translations.len(), 2);
        assert_eq!(result.translations[0]["en"], "[en] Page Title");
        assert_eq!(result.translations[1]["vi"], "[vi] First paragraph of page body.");
    }

    #[test]
    fn test_fetch_failure_yields_failed_result() {
        let job = PageJob::new("https://example.com/missing", 3);
        let result = job.run(
            &BrokenFetcher,
            &EchoTranslator,
            &languages(),
            &ExtractConfig::default(),
            &ChunkConfig::default(),
        );

        assert_eq!(result.status, JobStatus::Failed);
        assert_eq!(result.url_index, 3);
        assert!(result.error.as_deref().unwrap().contains("Invalid URL"));
        assert!(result.fragments.is_empty());
    }

    #[test]
    fn test_empty_extraction_yields_failed_result() {
        let job = PageJob::new("https://example.com/empty", 0);
        let result = job.run(
            &CannedFetcher { body: "<body></body>" },
            &EchoTranslator,
            &languages(),
            &ExtractConfig::default(),
            &ChunkConfig::default(),
        );

        assert_eq!(result.status, JobStatus::Failed);
        assert!(result.error.as_deref().unwrap().contains("No text fragments"));
    }

    #[test]
    fn test_translation_failure_degrades_to_placeholder_but_succeeds() {
        let job = PageJob::new("https://example.com", 0);
        let result = job.run(
            &CannedFetcher { body: PAGE },
            &BrokenTranslator,
            &languages(),
            &ExtractConfig::default(),
            &ChunkConfig::default(),
        );

        assert_eq!(result.status, JobStatus::Success);
        for per_fragment in &result.translations {
            for translated in per_fragment.values() {
                assert!(translated.starts_with("[translation failed: "));
            }
        }
    }

    #[test]
    fn test_no_languages_requested_yields_empty_maps() {
        let job = PageJob::new("https://example.com", 0);
        let result = job.run(
            &CannedFetcher { body: PAGE },
            &EchoTranslator,
            &[],
            &ExtractConfig::default(),
            &ChunkConfig::default(),
        );

        assert_eq!(result.status, JobStatus::Success);
        assert!(result.translations.iter().all(|map| map.is_empty()));
    }

    #[test]
    fn test_result_serialization() {
        let job = PageJob::new("https://example.com", 1);
        let result = job.run(
            &CannedFetcher { body: PAGE },
            &EchoTranslator,
            &languages(),
            &ExtractConfig::default(),
            &ChunkConfig::default(),
        );

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""status":"success""#));
        assert!(json.contains(r#""url_index":1"#));
        assert!(json.contains(r#""timestamp":""#));
    }
}
