//! Catalog sources: where session snapshots come from.

use std::path::PathBuf;

use async_trait::async_trait;
use kiosk_commerce::CatalogItem;
use tracing::debug;

use crate::error::CatalogError;

/// A provider of catalog snapshots.
///
/// One fetch yields the full session list; there is no pagination or
/// incremental delivery. Implementations make a single attempt per call
/// and surface failures as [`CatalogError`], leaving retry decisions to
/// the caller.
#[async_trait]
pub trait CatalogSource {
    /// Fetch a complete catalog snapshot.
    async fn fetch(&self) -> Result<Vec<CatalogItem>, CatalogError>;
}

#[async_trait]
impl<S: CatalogSource + Send + Sync + ?Sized> CatalogSource for Box<S> {
    async fn fetch(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        (**self).fetch().await
    }
}

/// Catalog source backed by an HTTP endpoint serving a JSON array.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    url: String,
    http: reqwest::Client,
}

impl HttpCatalog {
    /// Create a source fetching from `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Endpoint this source fetches from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Connection(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let items: Vec<CatalogItem> = resp
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        debug!(count = items.len(), url = %self.url, "catalog fetched");
        Ok(items)
    }
}

/// Catalog source backed by a local JSON file.
///
/// Serves the same wire format as [`HttpCatalog`]; used for offline runs
/// and tests.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn fetch(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Io(format!("{}: {e}", self.path.display())))?;

        let items: Vec<CatalogItem> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;

        debug!(count = items.len(), path = %self.path.display(), "catalog read");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_catalog(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_http_catalog_keeps_endpoint_url() {
        let source = HttpCatalog::new("http://localhost:8080/sessions.json");
        assert_eq!(source.url(), "http://localhost:8080/sessions.json");
    }

    #[tokio::test]
    async fn test_file_catalog_reads_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(
            &dir,
            "sessions.json",
            r#"[{"id":1,"name":"Morning Flow","price":45},
                {"id":2,"name":"Studio Hour","description":"Open bench","price":25}]"#,
        );

        let items = FileCatalog::new(path).fetch().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Morning Flow");
        assert_eq!(items[1].description.as_deref(), Some("Open bench"));
    }

    #[tokio::test]
    async fn test_file_catalog_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileCatalog::new(dir.path().join("absent.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[tokio::test]
    async fn test_file_catalog_bad_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(&dir, "broken.json", "{ nope");
        let err = FileCatalog::new(path).fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
