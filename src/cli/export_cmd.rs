//! `rackspec export <out.csv>` — write stored records to CSV.

use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::export;
use crate::store::SpecStore;
use anyhow::{bail, Result};
use std::path::Path;

/// Run the export command. With `--url`, exports only that record.
pub fn run(out: &Path, url: Option<&str>) -> Result<()> {
    let s = Styled::new();
    let config = Config::load()?;
    let store = SpecStore::open(&config.db_path())?;

    let records = match url {
        Some(url) => match store.get(url)? {
            Some(record) => vec![record],
            None => bail!("no record for {url}"),
        },
        None => store.list()?,
    };

    if records.is_empty() {
        bail!("nothing to export; the store is empty");
    }

    export::export_csv(&records, out)?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "exported": records.len(),
            "path": out,
        }));
        return Ok(());
    }

    eprintln!(
        "  {} Exported {} record(s) to {}",
        s.ok_sym(),
        records.len(),
        out.display()
    );

    Ok(())
}
