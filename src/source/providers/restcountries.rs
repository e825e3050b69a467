//! REST Countries source (`GET {base_url}/all`).
//!
//! The v3.1 API returns one JSON array of country objects. An optional
//! `fields` list narrows the response to what the normalizer reads.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::source::{CountrySource, DataFetchError};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

pub struct RestCountriesSource {
    base_url: String,
    fields: Vec<String>,
    client: reqwest::Client,
}

impl RestCountriesSource {
    pub fn new(
        base_url: Option<String>,
        fields: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, DataFetchError> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataFetchError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            fields,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/all", self.base_url)
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_countries(&self) -> Result<serde_json::Value, DataFetchError> {
        let url = self.endpoint();
        info!("REST Countries request: url={}, fields={:?}", url, self.fields);

        let mut request = self.client.get(&url);
        if !self.fields.is_empty() {
            request = request.query(&[("fields", self.fields.join(","))]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DataFetchError::Network(e.to_string()))?;

        debug!("REST Countries response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("REST Countries API error: {} - {}", status, err_body);
            return Err(DataFetchError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DataFetchError::Network(e.to_string()))?;
        debug!("REST Countries body: {} bytes", body.len());

        serde_json::from_slice(&body).map_err(|e| DataFetchError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let source = RestCountriesSource::new(None, Vec::new(), Duration::from_secs(5)).unwrap();
        assert_eq!(source.endpoint(), "https://restcountries.com/v3.1/all");
        assert_eq!(source.name(), "restcountries");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let source = RestCountriesSource::new(
            Some("http://localhost:8080/v3.1/".to_string()),
            Vec::new(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(source.endpoint(), "http://localhost:8080/v3.1/all");
    }
}
