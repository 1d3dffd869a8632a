pub mod batch;
pub mod chunk;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod fragment;
pub mod job;
pub mod parse;
pub mod sources;
pub mod translate;

pub use batch::{BatchConfig, BatchRunner, BatchSummary, DEFAULT_CONCURRENCY, StopSignal};
pub use chunk::{ChunkConfig, DEFAULT_MAX_CHUNK_CHARS, chunk_text, failure_placeholder, translate_fragment};
pub use error::{Result, TransferoError};
pub use extract::{DEFAULT_CONTAINMENT_THRESHOLD, ExtractConfig, extract_fragments};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{FetchConfig, Fetcher};
pub use formatters::{
    FragmentRow, JsonConfig, JsonFormatter, TextConfig, TextFormatter, convert_to_json, convert_to_text,
    fragment_rows,
};
pub use fragment::{FragmentKind, TextFragment, normalize_text};
pub use job::{JobStatus, PageJob, PageResult};
pub use parse::{Document, Element};
pub use sources::{normalize_url, parse_url_csv, parse_url_json, parse_url_lines, read_urls_from_path};
pub use translate::Translator;
#[cfg(feature = "http")]
pub use translate::{HttpTranslator, TranslatorConfig};
