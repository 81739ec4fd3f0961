//! Transport used to retrieve raw result documents.
//!
//! The collector only needs "GET this URL, give me the body". The `Fetch`
//! trait captures that; `HttpFetcher` implements it over blocking HTTP.

use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP status {status} from {url}")]
    Status {
        /// Status code returned.
        status: u16,
        /// Requested URL with credentials removed.
        url: String,
    },

    /// The request did not produce a response.
    #[error("Transport error for {url}: {message}")]
    Transport {
        /// Requested URL with credentials removed.
        url: String,
        /// Description of the failure.
        message: String,
    },

    /// The response body could not be read.
    #[error("Failed to read response body from {url}: {source}")]
    Body {
        /// Requested URL with credentials removed.
        url: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Capability to retrieve the raw bytes behind a URL.
///
/// Implementations must be thread-safe (Send + Sync). Timeouts and retries
/// are the implementation's responsibility.
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be read.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP implementation of `Fetch`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Creates a fetcher with default timeouts (3s connect, 10s read).
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeouts(Duration::from_secs(3), Duration::from_secs(10))
    }

    /// Creates a fetcher with explicit timeouts.
    #[must_use]
    pub fn with_timeouts(connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect_timeout)
                .timeout_read(read_timeout)
                .build(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.agent.get(url).call().map_err(|err| match err {
            ureq::Error::Status(status, _) => FetchError::Status {
                status,
                url: redact(url),
            },
            ureq::Error::Transport(transport) => FetchError::Transport {
                url: redact(url),
                message: transport.to_string(),
            },
        })?;

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|source| FetchError::Body {
                url: redact(url),
                source,
            })?;

        tracing::trace!(url = %redact(url), bytes = body.len(), "Fetched response");
        Ok(body)
    }
}

/// Strips the query string so credentials never end up in errors or logs.
#[must_use]
pub fn redact(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{base}?…"),
        None => url.to_string(),
    }
}
