// src/fetch/browser.rs

use std::future::Future;
use std::path::PathBuf;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::future::BoxFuture;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use super::{Page, PageSource};
use crate::error::{Result, ScrapeError};

/// Loads the page in a fresh headless Chromium for every fetch.
pub struct BrowserSource {
    chrome_executable: Option<PathBuf>,
}

impl BrowserSource {
    pub fn new(chrome_executable: Option<PathBuf>) -> Self {
        Self { chrome_executable }
    }

    fn browser_config(&self, url: &str) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        builder
            .build()
            .map_err(|e| ScrapeError::navigation(url, format!("browser config: {}", e)))
    }
}

/// Acquire a session, run `work` against it, then hand it to `release`.
///
/// `release` runs whether `work` succeeded or not; the work result is returned
/// after release. A failed acquire has nothing to release.
pub async fn with_session<S, T, A, W, R>(acquire: A, work: W, release: R) -> Result<T>
where
    A: Future<Output = Result<S>>,
    W: for<'a> FnOnce(&'a S) -> BoxFuture<'a, Result<T>>,
    R: FnOnce(S) -> BoxFuture<'static, ()>,
{
    let session = acquire.await?;
    let outcome = work(&session).await;
    release(session).await;
    outcome
}

/// A running Chromium plus the task draining its CDP events.
struct BrowserSession {
    browser: Browser,
    events: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(config: BrowserConfig, url: &str) -> Result<Self> {
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::navigation(url, format!("launching browser: {}", e)))?;
        let events = tokio::spawn(async move { while handler.next().await.is_some() {} });
        debug!("browser launched");
        Ok(Self { browser, events })
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "closing browser");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "waiting for browser exit");
        }
        self.events.abort();
        debug!("browser closed");
    }
}

async fn render(browser: &Browser, url: &str) -> Result<String> {
    let page = browser
        .new_page(url)
        .await
        .map_err(|e| ScrapeError::navigation(url, format!("opening page: {}", e)))?;
    page.wait_for_navigation()
        .await
        .map_err(|e| ScrapeError::navigation(url, format!("navigation: {}", e)))?;
    page.content()
        .await
        .map_err(|e| ScrapeError::navigation(url, format!("reading content: {}", e)))
}

#[async_trait]
impl PageSource for BrowserSource {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Page> {
        let config = self.browser_config(url)?;
        let target = url.to_string();
        let html = with_session(
            BrowserSession::launch(config, url),
            move |session| Box::pin(async move { render(&session.browser, &target).await }),
            |session| Box::pin(session.close()),
        )
        .await?;

        Ok(Page {
            url: url.to_string(),
            html,
        })
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeSession {
        released: Arc<AtomicUsize>,
        html: &'static str,
    }

    fn open(released: &Arc<AtomicUsize>) -> impl Future<Output = Result<FakeSession>> {
        let released = released.clone();
        async move {
            Ok(FakeSession {
                released,
                html: "<table></table>",
            })
        }
    }

    fn release(session: FakeSession) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            session.released.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test]
    async fn releases_after_successful_work() {
        let released = Arc::new(AtomicUsize::new(0));
        let html = with_session(
            open(&released),
            |s| Box::pin(async move { Ok(s.html.to_string()) }),
            release,
        )
        .await
        .unwrap();
        assert_eq!(html, "<table></table>");
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn releases_when_work_fails_and_keeps_the_error() {
        let released = Arc::new(AtomicUsize::new(0));
        let err = with_session(
            open(&released),
            |_s| {
                Box::pin(async {
                    Err::<String, _>(ScrapeError::navigation("https://example.com/", "timed out"))
                })
            },
            release,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScrapeError::Navigation { .. }));
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_acquire_skips_work_and_release() {
        let released = Arc::new(AtomicUsize::new(0));
        let worked = AtomicUsize::new(0);
        let err = with_session(
            async { Err::<FakeSession, _>(ScrapeError::navigation("https://example.com/", "no chromium")) },
            |_s| {
                worked.fetch_add(1, Ordering::SeqCst);
                Box::pin(async { Ok(()) })
            },
            release,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ScrapeError::Navigation { .. }));
        assert_eq!(worked.load(Ordering::SeqCst), 0);
        assert_eq!(released.load(Ordering::SeqCst), 0);
    }
}
