//! Local JSON snapshot in the REST Countries format.

use std::path::PathBuf;

use async_trait::async_trait;
use log::info;

use crate::source::{CountrySource, DataFetchError};

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CountrySource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_countries(&self) -> Result<serde_json::Value, DataFetchError> {
        info!("Reading countries from {}", self.path.display());
        let contents = tokio::fs::read(&self.path)
            .await
            .map_err(|e| DataFetchError::Io(format!("{}: {e}", self.path.display())))?;
        serde_json::from_slice(&contents).map_err(|e| DataFetchError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("globetrotter-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_reads_json_array() {
        let path = temp_path("countries.json");
        std::fs::write(&path, r#"[{"name":{"common":"Aruba"}}]"#).unwrap();

        let value = FileSource::new(path.clone()).fetch_countries().await.unwrap();
        assert_eq!(value[0]["name"]["common"], "Aruba");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = FileSource::new(temp_path("does-not-exist.json"))
            .fetch_countries()
            .await;
        assert!(matches!(result, Err(DataFetchError::Io(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let path = temp_path("broken.json");
        std::fs::write(&path, "[{").unwrap();

        let result = FileSource::new(path.clone()).fetch_countries().await;
        assert!(matches!(result, Err(DataFetchError::Parse(_))));

        std::fs::remove_file(path).ok();
    }
}
