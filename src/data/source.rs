//! Acquisition of the GDP JSON document.
//!
//! The remote source is fetched with a single blocking GET: no retry and no
//! timeout. A local file with the same shape can be used instead.

use std::path::Path;

use reqwest::blocking::Client;

use crate::domain::{DEFAULT_DATA_URL, Dataset};
use crate::error::AppError;

/// Environment variable overriding [`DEFAULT_DATA_URL`].
pub const URL_ENV: &str = "GDP_DATA_URL";

pub struct GdpClient {
    client: Client,
    url: String,
}

impl GdpClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Build a client for `GDP_DATA_URL` (read from the environment or `.env`),
    /// falling back to the default source.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let url = std::env::var(URL_ENV).unwrap_or_else(|_| DEFAULT_DATA_URL.to_string());
        Self::new(url)
    }

    pub fn fetch(&self) -> Result<Dataset, AppError> {
        tracing::info!(url = %self.url, "fetching GDP dataset");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| AppError::fetch(format!("GDP request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::fetch(format!(
                "GDP request failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::fetch(format!("Failed to read GDP response body: {e}")))?;

        parse_dataset(&body)
    }
}

/// Load a dataset from a local JSON file.
pub fn load_file(path: &Path) -> Result<Dataset, AppError> {
    tracing::info!(path = %path.display(), "loading GDP dataset from file");
    let body = std::fs::read_to_string(path)
        .map_err(|e| AppError::fetch(format!("Failed to read '{}': {e}", path.display())))?;
    parse_dataset(&body)
}

/// Parse a JSON body into a [`Dataset`].
pub fn parse_dataset(body: &str) -> Result<Dataset, AppError> {
    let dataset: Dataset = serde_json::from_str(body)
        .map_err(|e| AppError::parse(format!("Failed to parse GDP dataset: {e}")))?;
    tracing::debug!(points = dataset.data.len(), code = %dataset.code, "parsed GDP dataset");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const BODY: &str = r#"{
        "name": "Gross Domestic Product, USA",
        "description": "See (http://example.com/x.pdf) for notes.",
        "code": "GDP",
        "data": [["1947-01-01", 243.1], ["1947-04-01", 246.3]]
    }"#;

    #[test]
    fn parses_dataset_body() {
        let ds = parse_dataset(BODY).unwrap();
        assert_eq!(ds.code, "GDP");
        assert_eq!(ds.data.len(), 2);
        assert_eq!(ds.data[1].date, "1947-04-01");
        assert_eq!(ds.data[1].value, 246.3);
    }

    #[test]
    fn ignores_unknown_fields() {
        let body = r#"{"name":"a","description":"b","code":"c","data":[],"frequency":"quarterly"}"#;
        assert!(parse_dataset(body).unwrap().data.is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_dataset("<html>not json</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let err = parse_dataset(r#"{"name":"a","data":[["1947-01-01"]]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn missing_file_is_fetch_error() {
        let path = std::env::temp_dir().join("gdp-chart-does-not-exist.json");
        let err = load_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[test]
    fn loads_file_round_trip() {
        let path = std::env::temp_dir().join(format!("gdp-chart-source-{}.json", std::process::id()));
        std::fs::write(&path, BODY).unwrap();
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.data[0].date, "1947-01-01");
    }
}
