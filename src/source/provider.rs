use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while fetching the catalog.
/// Variants carry enough info to decide whether a retry makes sense.
#[derive(Debug, Clone, PartialEq)]
pub enum DataFetchError {
    /// Source misconfigured (bad URL, unbuildable client). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Provider returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Payload was not JSON, or not a sequence of countries. Not retryable.
    Parse(String),
    /// Local file could not be read. Not retryable.
    Io(String),
}

impl DataFetchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            DataFetchError::Network(_) => true,
            DataFetchError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl fmt::Display for DataFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFetchError::Config(msg) => write!(f, "config error: {msg}"),
            DataFetchError::Network(msg) => write!(f, "network error: {msg}"),
            DataFetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            DataFetchError::Parse(msg) => write!(f, "parse error: {msg}"),
            DataFetchError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for DataFetchError {}

/// Where the raw country payload comes from.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Fetches the raw payload. Shape validation belongs to the normalizer.
    async fn fetch_countries(&self) -> Result<serde_json::Value, DataFetchError>;
}
