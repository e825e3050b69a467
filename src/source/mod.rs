//! # Country Data Sources
//!
//! The one async operation in the app: fetch the raw catalog once, then hand
//! it to the normalizer. Sources are opaque to the core; any failure here
//! ends as an empty catalog, never a crash.

pub mod provider;
pub mod providers;

use std::time::Duration;

use log::{info, warn};

pub use provider::{CountrySource, DataFetchError};
pub use providers::{FileSource, RestCountriesSource};

use crate::core::normalize::{NormalizedBatch, normalize_payload};

/// Bounded retry for the initial fetch.
///
/// `attempts` counts the first try; `delay` grows linearly per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 1,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self {
            attempts: retries.saturating_add(1),
            delay,
        }
    }

    /// Wait after the given failed attempt, saturating instead of overflowing.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(attempt)
    }
}

/// Fetches and normalizes the catalog, retrying transient failures.
pub async fn load_catalog(
    source: &dyn CountrySource,
    policy: RetryPolicy,
) -> Result<NormalizedBatch, DataFetchError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        info!("Fetching catalog from {} (attempt {}/{})", source.name(), attempt, attempts);
        match source.fetch_countries().await {
            Ok(payload) => return normalize_payload(payload),
            Err(e) if e.is_retryable() && attempt < attempts => {
                let wait = policy.backoff(attempt);
                warn!("Fetch attempt {} failed: {}; retrying in {:?}", attempt, e, wait);
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            Err(e) => {
                warn!("Fetch from {} failed: {}", source.name(), e);
                return Err(e);
            }
        }
    }
}
