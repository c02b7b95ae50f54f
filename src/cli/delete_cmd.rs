//! `rackspec delete <url>` — remove a stored record.

use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::store::SpecStore;
use anyhow::{bail, Result};

/// Run the delete command.
pub fn run(url: &str) -> Result<()> {
    let s = Styled::new();
    let config = Config::load()?;
    let store = SpecStore::open(&config.db_path())?;

    if !store.delete(url)? {
        bail!("no record for {url}");
    }

    if output::is_json() {
        output::print_json(&serde_json::json!({ "deleted": url }));
        return Ok(());
    }

    eprintln!("  {} Deleted {url}", s.ok_sym());
    Ok(())
}
