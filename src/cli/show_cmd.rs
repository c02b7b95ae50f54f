//! `rackspec show <url>` — print one stored record.

use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::store::SpecStore;
use anyhow::{bail, Result};
use chrono::Utc;

/// Run the show command.
pub fn run(url: &str) -> Result<()> {
    let s = Styled::new();
    let config = Config::load()?;
    let store = SpecStore::open(&config.db_path())?;

    let Some(record) = store.get(url)? else {
        bail!("no record for {url}");
    };

    if output::is_json() {
        output::print_json(&serde_json::json!({ "record": record }));
        return Ok(());
    }

    let age = (Utc::now() - record.fetched_at).num_seconds().max(0) as u64;

    eprintln!();
    eprintln!("  {}", s.bold(&record.url));
    eprintln!("  {}", s.dim(&format!("fetched {}", output::format_age(age))));
    eprintln!();
    for (label, value) in record.sheet.fields() {
        output::print_field(label, &value);
    }
    eprintln!();

    Ok(())
}
