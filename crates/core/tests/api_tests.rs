//! Library API integration tests
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use transfero_core::*;

/// Serves canned HTML per URL; unknown URLs fail like unreachable pages.
struct SiteFetcher {
    pages: HashMap<&'static str, &'static str>,
}

impl Fetcher for SiteFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .map(|body| body.to_string())
            .ok_or_else(|| TransferoError::InvalidUrl(format!("unreachable: {}", url)))
    }
}

/// Tags each translation with its language and counts calls.
struct TaggingTranslator {
    calls: AtomicUsize,
}

impl Translator for TaggingTranslator {
    fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}::{}", target_lang, text))
    }
}

const ARTICLE: &str = r#"
    <html>
    <head><title>Sustainability</title></head>
    <body>
        <nav><a href="/">Home</a></nav>
        <main>
            <h1>ESG Strategy</h1>
            <p>Our company pursues a long-term sustainability strategy.</p>
            <div>Climate risk is reviewed by the board every quarter</div>
            <p>Climate risk is reviewed by the board every quarter.</p>
            <ul>
                <li>Reduce emissions across the supply chain</li>
                <li>Publish an annual progress report</li>
            </ul>
        </main>
        <footer><p>Copyright notice in the footer.</p></footer>
    </body>
    </html>
"#;

const STUB: &str = "<body><main></main><p>hidden</p></body>";

fn site() -> Arc<SiteFetcher> {
    let mut pages = HashMap::new();
    pages.insert("https://example.com/article", ARTICLE);
    pages.insert("https://example.com/stub", STUB);
    Arc::new(SiteFetcher { pages })
}

fn translator() -> Arc<TaggingTranslator> {
    Arc::new(TaggingTranslator { calls: AtomicUsize::new(0) })
}

#[test]
fn test_extract_fragments_api() {
    let doc = Document::parse(ARTICLE).expect("should parse");
    let fragments = extract_fragments(&doc, &ExtractConfig::default());

    let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "ESG Strategy",
            "Our company pursues a long-term sustainability strategy.",
            "Climate risk is reviewed by the board every quarter.",
            "Reduce emissions across the supply chain",
            "Publish an annual progress report",
        ]
    );
    assert_eq!(fragments[0].kind, FragmentKind::Heading);
    assert!(fragments.iter().skip(1).all(|f| f.kind == FragmentKind::Content));
}

#[test]
fn test_page_job_api() {
    let job = PageJob::new("https://example.com/article", 0);
    let result = job.run(
        site().as_ref(),
        translator().as_ref(),
        &["en".to_string(), "vi".to_string()],
        &ExtractConfig::default(),
        &ChunkConfig::default(),
    );

    assert_eq!(result.status, JobStatus::Success);
    assert_eq!(result.fragment_count(), 5);
    assert_eq!(result.translations[0]["en"], "en::ESG Strategy");
    assert_eq!(result.translations[0]["vi"], "vi::ESG Strategy");
}

#[test]
fn test_batch_run_api() {
    let urls = vec![
        "https://example.com/article".to_string(),
        "https://example.com/missing".to_string(),
        "https://example.com/stub".to_string(),
    ];
    let translator = translator();
    let runner = BatchRunner::new(site(), translator.clone(), BatchConfig::default());
    let summary = runner.run(&urls, &["en".to_string()]);

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 2);

    let ordered = summary.by_submission_order();
    assert_eq!(ordered[0].status, JobStatus::Success);
    assert_eq!(ordered[1].status, JobStatus::Failed);
    assert!(ordered[1].error.as_deref().unwrap().contains("unreachable"));
    // The stub page fetches fine but extracts nothing.
    assert_eq!(ordered[2].status, JobStatus::Failed);
    assert!(ordered[2].error.as_deref().unwrap().contains("No text fragments"));

    // One language, five fragments, one short call each.
    assert_eq!(translator.calls.load(Ordering::SeqCst), 5);
}

#[test]
fn test_report_formatters_api() {
    let urls = vec![
        "https://example.com/article".to_string(),
        "https://example.com/missing".to_string(),
    ];
    let runner = BatchRunner::new(site(), translator(), BatchConfig::default());
    let summary = runner.run(&urls, &["en".to_string()]);

    let text = convert_to_text(&summary, &TextConfig { include_rows: true }).unwrap();
    assert!(text.contains("Succeeded: 1"));
    assert!(text.contains("[1] heading <h1> ESG Strategy"));

    let json = convert_to_json(&summary, &JsonConfig { pretty: true }).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["pages"][0]["rows"][0]["translations"]["en"], "en::ESG Strategy");
    assert_eq!(parsed["pages"][1]["status"], "failed");
}

#[test]
fn test_chunked_translation_api() {
    let translator = translator();
    let sentence = "All work and no play makes for dull reports. ".repeat(250);

    let translated = translate_fragment(
        translator.as_ref(),
        &sentence,
        "en",
        &ChunkConfig::default(),
    );

    assert!(translator.calls.load(Ordering::SeqCst) > 1);
    assert!(translated.starts_with("en::"));
    assert!(!translated.contains("translation failed"));
}

#[test]
fn test_url_sources_api() {
    let urls = parse_url_lines("example.com\n# comment\nhttps://example.com/a\n");
    assert_eq!(urls, vec!["https://example.com", "https://example.com/a"]);

    let urls = parse_url_json(r#"{"urls": ["example.com/b"]}"#).unwrap();
    assert_eq!(urls, vec!["https://example.com/b"]);
}
