//! Page acquisition.
//!
//! A [`PageFetcher`] turns a product page URL into the visible text of its
//! specifications region. The primary implementation drives headless
//! Chrome; a static HTTP implementation covers pages that render
//! server-side.

pub mod browser;
pub mod static_http;

pub use browser::BrowserFetcher;
pub use static_http::StaticFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// DOM id of the specifications region on product pages.
pub const SPEC_REGION_ID: &str = "specifications";

/// A fetched page: where it came from and what it contained.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested.
    pub url: String,
    /// The URL after redirects.
    pub final_url: String,
    /// Visible text of the specifications region, or of the whole body
    /// when no such region exists.
    pub spec_text: String,
    /// Raw page HTML, kept so it can be dumped for inspection.
    pub html: String,
}

/// Errors from page acquisition.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to configure browser: {0}")]
    Launch(String),
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
    #[error("unexpected value from page script: {0}")]
    Eval(#[from] serde_json::Error),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(u16),
}

/// How a page's visible text is obtained.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page. One underlying resource (browser process or HTTP
    /// request) per call; implementations clean up on every path.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
