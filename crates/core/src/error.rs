//! Error types for Transfero operations.
//!
//! This module defines the main error type [`TransferoError`] which represents
//! all possible errors that can occur while fetching pages, extracting text
//! fragments, translating them, and reading URL source files.
//!
//! Expected per-page failures (unreachable page, empty extraction) are values
//! of this type; they are converted into `Failed` page results at the job
//! boundary and never abort a running batch.
//!
//! # Example
//!
//! ```rust
//! use transfero_core::{TransferoError, Result};
//!
//! fn check_input(html: &str) -> Result<()> {
//!     if html.is_empty() {
//!         return Err(TransferoError::NoFragments);
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for extraction and translation operations.
///
/// This enum represents all possible errors that can occur during
/// HTTP fetching, HTML parsing, fragment extraction, translation calls,
/// and URL source file handling.
#[derive(Error, Debug)]
pub enum TransferoError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// non-2xx statuses, and other HTTP-related problems.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to malformed markup
    /// or invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No text fragments could be extracted from the document.
    ///
    /// Extraction on an empty tree yields an empty sequence rather than this
    /// error; page jobs promote the empty sequence to this failure so that a
    /// page with no usable text is reported as failed, not as an empty row
    /// set.
    #[error("No text fragments could be extracted from the document")]
    NoFragments,

    /// Translation service failure.
    ///
    /// Returned by [`Translator`](crate::Translator) implementations when a
    /// single translation call fails. The chunked translation layer catches
    /// this and substitutes a placeholder; it never escapes a page job.
    #[error("Translation request failed: {0}")]
    TranslationFailed(String),

    /// URL source file not found.
    #[error("URL source file not found: {0}")]
    FileNotFound(PathBuf),

    /// File I/O errors.
    ///
    /// Wraps standard I/O errors while reading URL source files or writing
    /// reports.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// URL source format errors.
    ///
    /// Returned when a structured URL source (JSON) cannot be interpreted
    /// as a list of URLs.
    #[error("Invalid URL source: {0}")]
    SourceError(String),

    /// Report serialization errors.
    #[error("Failed to serialize report: {0}")]
    SerializeError(String),
}

/// Result type alias for TransferoError.
///
/// This is a convenience alias for `std::result::Result<T, TransferoError>`.
pub type Result<T> = std::result::Result<T, TransferoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransferoError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = TransferoError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_no_fragments_error() {
        let err = TransferoError::NoFragments;
        assert!(err.to_string().contains("No text fragments"));
    }

    #[test]
    fn test_translation_error() {
        let err = TransferoError::TranslationFailed("service unavailable".to_string());
        assert!(err.to_string().contains("service unavailable"));
    }
}
