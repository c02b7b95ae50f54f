//! `rackspec fetch <url>` — render a product page and extract its spec sheet.

use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::extract::parse_spec_text;
use crate::fetch::{BrowserFetcher, PageFetcher, StaticFetcher};
use crate::store::{SpecRecord, SpecStore};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::ValueEnum;
use std::path::Path;
use std::time::Instant;
use tracing::info;
use url::Url;

/// Which acquisition engine renders the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// Headless Chrome; handles script-rendered spec sheets.
    #[default]
    Browser,
    /// Plain HTTP GET; enough for server-rendered pages.
    Static,
}

/// Run the fetch command.
pub async fn run(url: &str, engine: Engine, dump: Option<&Path>, no_store: bool) -> Result<()> {
    let s = Styled::new();
    let start = Instant::now();

    Url::parse(url).with_context(|| format!("invalid URL: {url}"))?;

    let config = Config::load()?;

    if !output::is_quiet() && !output::is_json() {
        eprintln!("  Fetching {url}...");
    }

    let fetcher: Box<dyn PageFetcher> = match engine {
        Engine::Browser => Box::new(BrowserFetcher::new(&config)),
        Engine::Static => Box::new(StaticFetcher::new(config.http_timeout_ms)?),
    };
    let page = fetcher
        .fetch(url)
        .await
        .with_context(|| format!("failed to fetch {url}"))?;

    if let Some(path) = dump {
        std::fs::write(path, &page.html)
            .with_context(|| format!("failed to write dump: {}", path.display()))?;
        info!("saved page HTML to {}", path.display());
    }

    let record = SpecRecord {
        url: url.to_string(),
        sheet: parse_spec_text(&page.spec_text),
        fetched_at: Utc::now(),
    };

    // An empty sheet is still stored: the URL counts as seen, and a later
    // fetch of the same URL replaces the row.
    if !no_store {
        let store = SpecStore::open(&config.db_path())?;
        store.upsert(&record).context("failed to store record")?;
    }

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "record": record,
            "final_url": page.final_url,
            "stored": !no_store,
            "duration_ms": start.elapsed().as_millis(),
        }));
        return Ok(());
    }

    if record.sheet.is_empty() {
        eprintln!();
        eprintln!("  {} No spec attributes could be extracted.", s.warn_sym());
        if !no_store {
            eprintln!("  The URL was still recorded; re-fetching will replace it.");
        }
        return Ok(());
    }

    eprintln!();
    for (label, value) in record.sheet.fields() {
        output::print_field(label, &value);
    }
    eprintln!();

    let stored = if no_store { "not stored" } else { "stored" };
    eprintln!(
        "  {} Done in {:.1}s ({stored})",
        s.ok_sym(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
