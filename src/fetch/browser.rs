//! Browser-rendered acquisition via headless Chrome.
//!
//! Navigates to the page, then polls for the specifications region up to a
//! bounded deadline rather than sleeping a fixed interval; script-rendered
//! sheets appear as soon as they exist, and pages without the region fall
//! back to the whole body text at the deadline.

use crate::config::Config;
use crate::fetch::{FetchError, FetchedPage, PageFetcher, SPEC_REGION_ID};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Fetches pages through a headless Chrome instance, one browser process
/// per fetch.
pub struct BrowserFetcher {
    browser_binary: Option<PathBuf>,
    headless: bool,
    nav_timeout: Duration,
    settle_timeout: Duration,
    poll_interval: Duration,
}

impl BrowserFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            browser_binary: config.browser_binary.clone(),
            headless: config.headless,
            nav_timeout: Duration::from_millis(config.nav_timeout_ms),
            settle_timeout: Duration::from_millis(config.settle_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, FetchError> {
        let mut builder = BrowserConfig::builder().request_timeout(self.nav_timeout);
        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(bin) = &self.browser_binary {
            builder = builder.chrome_executable(bin);
        }
        builder.build().map_err(FetchError::Launch)
    }

    async fn render(&self, browser: &Browser, url: &str) -> Result<FetchedPage, FetchError> {
        let page = browser.new_page(url).await?;
        page.wait_for_navigation().await?;

        let final_url = page.url().await?.unwrap_or_else(|| url.to_string());
        let spec_text = self.settle_spec_text(&page).await?;
        let html = page.content().await?;
        page.close().await.ok();

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            spec_text,
            html,
        })
    }

    /// Poll for the spec region until it carries text or the deadline
    /// passes; fall back to the body text after the deadline.
    async fn settle_spec_text(&self, page: &Page) -> Result<String, FetchError> {
        let deadline = Instant::now() + self.settle_timeout;
        let selector = format!("#{SPEC_REGION_ID}");

        loop {
            if let Ok(element) = page.find_element(selector.as_str()).await {
                if let Ok(Some(text)) = element.inner_text().await {
                    let text = text.trim();
                    if !text.is_empty() {
                        debug!("spec region settled ({} chars)", text.len());
                        return Ok(text.to_string());
                    }
                }
            }
            if Instant::now() >= deadline {
                break;
            }
            sleep(self.poll_interval).await;
        }

        warn!(
            "no #{SPEC_REGION_ID} region within {}ms, falling back to body text",
            self.settle_timeout.as_millis()
        );
        let body = page
            .evaluate("document.body ? document.body.innerText : ''")
            .await?
            .into_value::<String>()?;
        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let config = self.browser_config()?;
        let (mut browser, mut handler) = Browser::launch(config).await?;

        // Drive the CDP event loop until the browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = self.render(&browser, url).await;

        // Tear the browser down on every path, including render failures.
        if let Err(e) = browser.close().await {
            warn!("failed to close browser: {e}");
        }
        browser.wait().await.ok();
        handler_task.abort();

        result
    }
}
