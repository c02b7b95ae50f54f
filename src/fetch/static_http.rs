//! Static acquisition: plain HTTP GET plus visible-text flattening.
//!
//! No JavaScript runs, so this only works for pages whose spec sheet is
//! present in the served HTML. It is much cheaper than a browser render.

use crate::fetch::{FetchError, FetchedPage, PageFetcher, SPEC_REGION_ID};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

static SPEC_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(&format!("#{SPEC_REGION_ID}")).unwrap());

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Fetches pages with a plain HTTP client.
pub struct StaticFetcher {
    client: reqwest::Client,
}

impl StaticFetcher {
    pub fn new(timeout_ms: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(concat!("rackspec/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let html = response.text().await?;
        let spec_text = visible_text(&html);

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            spec_text,
            html,
        })
    }
}

/// Visible text of the spec region, or of the whole body when the region
/// is absent.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    if let Some(region) = document.select(&SPEC_SELECTOR).next() {
        return flatten(region);
    }
    if let Some(body) = document.select(&BODY_SELECTOR).next() {
        return flatten(body);
    }
    String::new()
}

/// Collect the element's text nodes, one per line, skipping script and
/// style contents.
fn flatten(root: ElementRef<'_>) -> String {
    let mut lines = Vec::new();

    for node in root.descendants() {
        if let Some(text) = node.value().as_text() {
            let parent_tag = node
                .parent()
                .and_then(ElementRef::wrap)
                .map(|el| el.value().name().to_ascii_lowercase());
            if matches!(
                parent_tag.as_deref(),
                Some("script") | Some("style") | Some("noscript")
            ) {
                continue;
            }
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }
    }

    lines.join("\n")
}
