//! `rackspec list` — summarize stored records, newest first.

use crate::cli::output;
use crate::config::Config;
use crate::store::SpecStore;
use anyhow::Result;
use chrono::Utc;

/// Run the list command.
pub fn run() -> Result<()> {
    let config = Config::load()?;
    let store = SpecStore::open(&config.db_path())?;
    let records = store.list()?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "count": records.len(),
            "records": records,
        }));
        return Ok(());
    }

    if records.is_empty() {
        eprintln!("  No records yet. Fetch one with: rackspec fetch <url>");
        return Ok(());
    }

    eprintln!();
    for record in &records {
        let socket = record.sheet.cpu_socket.as_deref().unwrap_or("-");
        let rack = record.sheet.rack_unit.as_deref().unwrap_or("-");
        let age = (Utc::now() - record.fetched_at).num_seconds().max(0) as u64;
        eprintln!(
            "  {:<22} {:<4} {:<12} {}",
            socket,
            rack,
            output::format_age(age),
            record.url
        );
    }
    eprintln!();
    eprintln!("  {} record(s)", records.len());

    Ok(())
}
