//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::core::country::CountryRecord;
use crate::core::filter::FilterState;
use crate::core::state::App;
use crate::source::{CountrySource, DataFetchError};

/// A minimal record: name, continents and sovereignty.
pub fn country(name: &str, continents: &[&str], independent: bool) -> CountryRecord {
    let mut record = CountryRecord::new(name);
    record.continents = continents.iter().map(|c| c.to_string()).collect();
    record.is_sovereign = independent;
    record
}

/// Creates a test App that is still waiting for its catalog.
pub fn test_app() -> App {
    App::new("test-source".to_string(), FilterState::default())
}

/// Always returns the same payload.
pub struct StaticSource(pub serde_json::Value);

#[async_trait]
impl CountrySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_countries(&self) -> Result<serde_json::Value, DataFetchError> {
        Ok(self.0.clone())
    }
}

/// Always fails with the same error.
pub struct FailingSource(pub DataFetchError);

#[async_trait]
impl CountrySource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch_countries(&self) -> Result<serde_json::Value, DataFetchError> {
        Err(self.0.clone())
    }
}

/// Fails with a network error for the first `failures` calls, then succeeds.
pub struct FlakySource {
    failures: u32,
    payload: serde_json::Value,
    calls: AtomicU32,
}

impl FlakySource {
    pub fn new(failures: u32, payload: serde_json::Value) -> Self {
        Self {
            failures,
            payload,
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CountrySource for FlakySource {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn fetch_countries(&self) -> Result<serde_json::Value, DataFetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(DataFetchError::Network(format!("connection reset (call {})", call + 1)))
        } else {
            Ok(self.payload.clone())
        }
    }
}
