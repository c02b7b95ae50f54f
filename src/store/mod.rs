//! SQLite-backed record store, keyed uniquely by URL.
//!
//! One row per product page. Re-fetching a URL replaces the previous row;
//! uniqueness is enforced by the schema, not by application checks.

use crate::extract::SpecSheet;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A stored spec sheet together with its source URL and fetch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecRecord {
    pub url: String,
    #[serde(flatten)]
    pub sheet: SpecSheet,
    pub fetched_at: DateTime<Utc>,
}

const COLUMNS: &str = "url, cpu_socket, max_tdp_watts, cpu_count, memory_type, dimm_slots, \
                       psu_config, rack_unit, drive_bays_25in, m2_slots, fetched_at";

/// Spec sheet store backed by SQLite.
pub struct SpecStore {
    db: Connection,
}

impl SpecStore {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Connection::open(path)
            .with_context(|| format!("failed to open spec store: {}", path.display()))?;

        db.execute_batch(
            "CREATE TABLE IF NOT EXISTS sheets (
                url TEXT PRIMARY KEY,
                cpu_socket TEXT,
                max_tdp_watts INTEGER,
                cpu_count INTEGER NOT NULL DEFAULT 1,
                memory_type TEXT,
                dimm_slots INTEGER,
                psu_config TEXT,
                rack_unit TEXT,
                drive_bays_25in INTEGER,
                m2_slots INTEGER,
                fetched_at TEXT NOT NULL
            );",
        )
        .context("failed to create sheets table")?;

        Ok(Self { db })
    }

    /// Open the default store at ~/.rackspec/sheets.db.
    pub fn default_store() -> Result<Self> {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".rackspec")
            .join("sheets.db");
        Self::open(&path)
    }

    /// Insert a record, replacing any previous row for the same URL.
    pub fn upsert(&self, record: &SpecRecord) -> Result<()> {
        let sheet = &record.sheet;
        self.db.execute(
            "INSERT INTO sheets (url, cpu_socket, max_tdp_watts, cpu_count, memory_type,
                                 dimm_slots, psu_config, rack_unit, drive_bays_25in, m2_slots,
                                 fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             ON CONFLICT(url) DO UPDATE SET
                 cpu_socket = excluded.cpu_socket,
                 max_tdp_watts = excluded.max_tdp_watts,
                 cpu_count = excluded.cpu_count,
                 memory_type = excluded.memory_type,
                 dimm_slots = excluded.dimm_slots,
                 psu_config = excluded.psu_config,
                 rack_unit = excluded.rack_unit,
                 drive_bays_25in = excluded.drive_bays_25in,
                 m2_slots = excluded.m2_slots,
                 fetched_at = excluded.fetched_at",
            rusqlite::params![
                record.url,
                sheet.cpu_socket,
                sheet.max_tdp_watts,
                sheet.cpu_count,
                sheet.memory_type,
                sheet.dimm_slots,
                sheet.psu_config,
                sheet.rack_unit,
                sheet.drive_bays_25in,
                sheet.m2_slots,
                record.fetched_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Look up a record by URL.
    pub fn get(&self, url: &str) -> Result<Option<SpecRecord>> {
        let mut stmt = self
            .db
            .prepare(&format!("SELECT {COLUMNS} FROM sheets WHERE url = ?1"))?;

        match stmt.query_row(rusqlite::params![url], row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All records, newest fetch first.
    pub fn list(&self) -> Result<Vec<SpecRecord>> {
        let mut stmt = self.db.prepare(&format!(
            "SELECT {COLUMNS} FROM sheets ORDER BY fetched_at DESC, url"
        ))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Remove a record. Returns whether a row was deleted.
    pub fn delete(&self, url: &str) -> Result<bool> {
        let rows = self
            .db
            .execute("DELETE FROM sheets WHERE url = ?1", rusqlite::params![url])?;
        Ok(rows > 0)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<SpecRecord> {
    let max_tdp_watts: Option<u32> = row.get(2)?;
    let cpu_count: u32 = row.get(3)?;

    let fetched_at: String = row.get(10)?;
    let fetched_at = DateTime::parse_from_rfc3339(&fetched_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(10, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(SpecRecord {
        url: row.get(0)?,
        sheet: SpecSheet {
            cpu_socket: row.get(1)?,
            max_tdp_watts,
            cpu_count,
            // Derived, not stored.
            total_tdp_watts: max_tdp_watts.map(|w| w * cpu_count),
            memory_type: row.get(4)?,
            dimm_slots: row.get(5)?,
            psu_config: row.get(6)?,
            rack_unit: row.get(7)?,
            drive_bays_25in: row.get(8)?,
            m2_slots: row.get(9)?,
        },
        fetched_at,
    })
}
