// src/fetch/file.rs

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use url::Url;

use super::{Page, PageSource};
use crate::error::{Result, ScrapeError};

/// Reads a saved copy of the page from a `file://` URL.
pub struct FileSource;

#[async_trait]
impl PageSource for FileSource {
    async fn fetch(&self, url: &str) -> Result<Page> {
        let path = Url::parse(url)
            .ok()
            .filter(|u| u.scheme() == "file")
            .and_then(|u| u.to_file_path().ok())
            .ok_or_else(|| ScrapeError::navigation(url, "not a file:// URL"))?;

        let html = fs::read_to_string(&path)
            .await
            .map_err(|e| ScrapeError::navigation(url, e))?;
        debug!(path = %path.display(), bytes = html.len(), "read page from disk");

        Ok(Page {
            url: url.to_string(),
            html,
        })
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_file_urls() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("page.html");
        std::fs::write(&path, "<table></table>").unwrap();
        let url = Url::from_file_path(&path).unwrap();

        let page = FileSource.fetch(url.as_str()).await.unwrap();
        assert_eq!(page.html, "<table></table>");
        assert_eq!(page.url, url.as_str());
    }

    #[tokio::test]
    async fn missing_file_is_a_navigation_error() {
        let err = FileSource
            .fetch("file:///definitely/not/here.html")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Navigation { .. }));
    }

    #[tokio::test]
    async fn rejects_other_schemes() {
        assert!(FileSource.fetch("https://example.com/").await.is_err());
    }
}
