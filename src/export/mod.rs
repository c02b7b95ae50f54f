//! CSV export of stored spec records.
//!
//! One header row of attribute labels, one row per record, empty cells for
//! absent attributes. The same writer serves whole-table and single-record
//! export.

use crate::extract::SpecSheet;
use crate::store::SpecRecord;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Header row: URL, the attribute labels, then the fetch timestamp.
pub fn csv_headers() -> Vec<&'static str> {
    let mut headers = vec!["URL"];
    headers.extend(SpecSheet::LABELS);
    headers.push("Fetched At");
    headers
}

/// Write records as CSV to any writer.
pub fn write_csv<W: Write>(records: &[SpecRecord], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(csv_headers())
        .context("writing CSV header")?;

    for record in records {
        let mut row = vec![record.url.clone()];
        row.extend(record.sheet.values());
        row.push(record.fetched_at.to_rfc3339());
        writer
            .write_record(&row)
            .with_context(|| format!("writing CSV row for {}", record.url))?;
    }

    writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write records as CSV to a file.
pub fn export_csv(records: &[SpecRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(records, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::parse_spec_text;
    use chrono::{TimeZone, Utc};

    fn sample_record() -> SpecRecord {
        SpecRecord {
            url: "https://example.com/p/r183".to_string(),
            sheet: parse_spec_text(
                "1U server\nDual processor\nLGA 4677 Socket E\nUp to 350W TDP\n\
                 32 x DIMM slots\nDDR5 RDIMM\n2 x 1300W redundant",
            ),
            fetched_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_header_row() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("URL,CPU Socket,Max TDP,CPU Count,Total TDP,Memory Type"));
        assert!(out.trim_end().ends_with("Fetched At"));
    }

    #[test]
    fn test_record_row() {
        let mut buf = Vec::new();
        write_csv(&[sample_record()], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let row = out.lines().nth(1).unwrap();

        assert!(row.starts_with("https://example.com/p/r183,LGA 4677 Socket E,350W,2,700W"));
        assert!(row.contains("2 x 1300W"));
        assert!(row.contains("2026-03-14T09:30:00+00:00"));
    }

    #[test]
    fn test_absent_attributes_are_empty_cells() {
        let record = SpecRecord {
            url: "https://example.com/p/blank".to_string(),
            sheet: parse_spec_text("2U chassis"),
            fetched_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        };

        let mut buf = Vec::new();
        write_csv(&[record], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let row = out.lines().nth(1).unwrap();

        // URL, then empty socket and TDP cells, cpu_count of 1, empty total.
        assert!(row.starts_with("https://example.com/p/blank,,,1,,"));
        assert!(row.contains(",2U,"));
    }
}
