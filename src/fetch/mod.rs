// src/fetch/mod.rs

use async_trait::async_trait;
use tracing::info;
use url::Url;

use crate::config::{Config, FetcherKind};
use crate::error::{Result, ScrapeError};

#[cfg(feature = "browser")]
pub mod browser;
pub mod file;
pub mod http;

/// A loaded page: the URL it came from and its rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub html: String,
}

/// Anything that can turn a URL into page markup.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Page>;

    fn name(&self) -> &'static str;
}

/// Pick the source for `config`: `file://` URLs always read from disk,
/// otherwise `config.fetcher` decides.
pub fn source_for(config: &Config) -> Result<Box<dyn PageSource>> {
    let url = Url::parse(&config.source_url)
        .map_err(|e| ScrapeError::navigation(&config.source_url, e))?;

    let source: Box<dyn PageSource> = if url.scheme() == "file" {
        Box::new(file::FileSource)
    } else {
        match config.fetcher {
            FetcherKind::Http => Box::new(http::HttpSource::new(config.request_timeout())?),
            FetcherKind::Browser => browser_source(config)?,
        }
    };
    info!(source = source.name(), url = %url, "selected page source");
    Ok(source)
}

#[cfg(feature = "browser")]
fn browser_source(config: &Config) -> Result<Box<dyn PageSource>> {
    Ok(Box::new(browser::BrowserSource::new(
        config.chrome_executable.clone(),
    )))
}

#[cfg(not(feature = "browser"))]
fn browser_source(_config: &Config) -> Result<Box<dyn PageSource>> {
    Err(ScrapeError::Config(
        "fetcher = browser needs the `browser` feature".into(),
    ))
}
