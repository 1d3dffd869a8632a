//! Translation capability and HTTP translation client.
//!
//! The [`Translator`] trait is the seam between the chunked translation
//! layer and whatever service actually performs translation. Jobs receive an
//! explicitly constructed translator value; there is no process-wide client,
//! which keeps concurrent jobs independent and lets tests substitute a fake.
//!
//! [`HttpTranslator`] speaks the DeepLX-style JSON protocol: a POST of
//! `{text, source_lang, target_lang}` answered by `{code, data}`.

#[cfg(feature = "http")]
use std::time::Duration;

#[cfg(feature = "http")]
use serde::{Deserialize, Serialize};

use crate::Result;
#[cfg(feature = "http")]
use crate::TransferoError;

/// A capability that translates text into a target language.
///
/// Language codes are opaque strings (e.g. `en`, `zh-cn`, `vi`) passed
/// through to the backing service unvalidated.
///
/// Implementations must be shareable across worker threads.
pub trait Translator: Send + Sync {
    /// Translates `text` into `target_lang`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing service is unreachable, rejects the
    /// request, or produces an unusable response. Callers above the chunking
    /// layer never see this error; it degrades to a placeholder value.
    fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

/// Configuration for the HTTP translation client.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Translation endpoint URL.
    pub api_url: String,
    /// Source language code sent with every request.
    pub source_lang: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

#[cfg(feature = "http")]
impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:1188/translate".to_string(),
            source_lang: "auto".to_string(),
            timeout: 30,
        }
    }
}

/// HTTP client for a DeepLX-compatible translation endpoint.
#[cfg(feature = "http")]
pub struct HttpTranslator {
    client: reqwest::blocking::Client,
    config: TranslatorConfig,
}

#[cfg(feature = "http")]
#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[cfg(feature = "http")]
#[derive(Deserialize)]
struct TranslateResponse {
    code: i64,
    data: String,
}

#[cfg(feature = "http")]
impl HttpTranslator {
    /// Creates a translation client from its configuration.
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(TransferoError::HttpError)?;

        Ok(Self { client, config })
    }
}

#[cfg(feature = "http")]
impl Translator for HttpTranslator {
    fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let body = TranslateRequest {
            text,
            source_lang: &self.config.source_lang,
            target_lang,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&body)
            .send()
            .map_err(|e| TransferoError::TranslationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransferoError::TranslationFailed(format!(
                "translation endpoint returned {}",
                response.status()
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .map_err(|e| TransferoError::TranslationFailed(format!("unreadable response: {}", e)))?;

        if parsed.code != 200 {
            return Err(TransferoError::TranslationFailed(format!(
                "translation endpoint returned code {}",
                parsed.code
            )));
        }

        Ok(parsed.data)
    }
}
