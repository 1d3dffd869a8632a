//! Page fetching.
//!
//! The [`Fetcher`] trait is the seam between page jobs and the network.
//! Jobs receive a fetcher value instead of constructing clients themselves,
//! so tests can substitute fakes and a batch shares one connection pool.
//!
//! [`HttpFetcher`] performs a blocking GET and returns the response body as
//! text. Timeouts, connection errors, and non-2xx statuses are all surfaced
//! as errors; the job layer treats them uniformly as page failure.

#[cfg(feature = "http")]
use std::time::Duration;

#[cfg(feature = "http")]
use url::Url;

use crate::Result;
#[cfg(feature = "http")]
use crate::TransferoError;

/// A capability that retrieves the HTML of a page by URL.
///
/// Implementations must be shareable across worker threads.
pub trait Fetcher: Send + Sync {
    /// Fetches the document at `url` and returns its body as text.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Transfero/1.0; +https://github.com/stormlightlabs/transfero)"
                .to_string(),
        }
    }
}

/// Blocking HTTP fetcher backed by a shared reqwest client.
#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    config: FetchConfig,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Creates a fetcher from its configuration.
    ///
    /// The client follows redirects and reuses connections across requests.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(TransferoError::HttpError)?;

        Ok(Self { client, config })
    }
}

#[cfg(feature = "http")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| TransferoError::InvalidUrl(e.to_string()))?;

        let response = self
            .client
            .get(parsed_url)
            .header("User-Agent", &self.config.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    TransferoError::Timeout { timeout: self.config.timeout }
                } else {
                    TransferoError::HttpError(e)
                }
            })?;

        let response = response.error_for_status().map_err(TransferoError::HttpError)?;
        let content = response.text()?;

        Ok(content)
    }
}
