use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::db::EntryStore;
use crate::models::{Entry, Month};

const HEADER: [&str; 6] = ["id", "month", "type", "name", "value", "created_at"];

/// Write `entries` as CSV, header first. Returns the number of data rows.
pub(crate) fn write_entries<W: Write>(entries: &[Entry], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)
        .context("Failed to write CSV header")?;
    for entry in entries {
        wtr.write_record([
            entry.id.to_string(),
            entry.month.to_string(),
            entry.entry_type.as_str().to_string(),
            entry.name.clone(),
            format!("{:.2}", entry.value),
            entry.created_at.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        ])
        .with_context(|| format!("Failed to write entry {}", entry.id))?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(entries.len())
}

/// Export every entry of `month` to a CSV file at `path`.
pub(crate) fn export_month(store: &mut EntryStore, month: Month, path: &Path) -> Result<usize> {
    let entries = store.get_entries_by_month(month)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_entries(&entries, file)
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
