//! `rackspec doctor` — environment readiness check.
//!
//! Verifies the pieces a first fetch needs: a Chrome/Chromium binary, a
//! writable data directory, and an openable database. Every failure comes
//! with a concrete fix instruction.

use crate::cli::output::{self, Styled};
use crate::config::Config;
use crate::store::SpecStore;
use anyhow::Result;
use std::path::PathBuf;

/// Binaries probed on PATH, in order of preference.
const BROWSER_NAMES: [&str; 5] = [
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Locate a Chrome/Chromium binary: explicit config first, then PATH.
pub fn find_browser(config: &Config) -> Option<PathBuf> {
    if let Some(bin) = &config.browser_binary {
        if bin.exists() {
            return Some(bin.clone());
        }
    }
    BROWSER_NAMES.iter().find_map(|name| which::which(name).ok())
}

/// Run the doctor diagnostic.
pub fn run() -> Result<()> {
    let config = Config::load()?;

    let browser = find_browser(&config);
    let data_dir = config.data_dir();
    let dir_ok = std::fs::create_dir_all(&data_dir).is_ok();
    let db = SpecStore::open(&config.db_path()).and_then(|store| store.list());

    let ready = browser.is_some() && dir_ok && db.is_ok();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "browser": browser,
            "data_dir": data_dir,
            "records": db.as_ref().map(|records| records.len()).ok(),
            "ready": ready,
        }));
        if !ready {
            std::process::exit(1);
        }
        return Ok(());
    }

    let s = Styled::new();
    eprintln!(
        "  {} {}",
        s.bold("rackspec"),
        s.dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    eprintln!();

    match &browser {
        Some(path) => output::print_check(s.ok_sym(), "Browser:", &path.display().to_string()),
        None => {
            output::print_check(s.fail_sym(), "Browser:", "no Chrome/Chromium found");
            output::print_detail("Install Chrome, or set browser_binary in ~/.rackspec/config.json.");
        }
    }

    if dir_ok {
        output::print_check(s.ok_sym(), "Data dir:", &data_dir.display().to_string());
    } else {
        output::print_check(
            s.fail_sym(),
            "Data dir:",
            &format!("cannot create {}", data_dir.display()),
        );
        output::print_detail("Check permissions, or set data_dir in the config.");
    }

    match &db {
        Ok(records) => output::print_check(
            s.ok_sym(),
            "Database:",
            &format!("{} record(s) at {}", records.len(), config.db_path().display()),
        ),
        Err(e) => {
            output::print_check(s.fail_sym(), "Database:", &e.to_string());
            output::print_detail("Delete the database file if it is corrupt; it will be recreated.");
        }
    }

    eprintln!();
    if ready {
        eprintln!("  {}: {}", s.bold("Status"), s.green("ready"));
    } else {
        eprintln!("  {}: {}", s.bold("Status"), s.red("not ready"));
        std::process::exit(1);
    }

    Ok(())
}
