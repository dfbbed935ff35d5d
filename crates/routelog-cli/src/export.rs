//! Weekly spreadsheet export.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use routelog_ledger::{export_filename, group_for_export, ExportError, ExportRow};
use routelog_store::RecordStore;

/// Write `rows` as CSV with a `DAY,ORIGIN,DESTINATION,KM` header.
fn write_rows(path: &Path, rows: &[ExportRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Group a week's trips and write them to `<out_dir>/routes-<week>.csv`.
///
/// Returns the written path, or `None` when the week has no trips (nothing is
/// written in that case).
///
/// # Errors
///
/// Returns an error if the output directory or file cannot be written.
pub(crate) fn export_week(
    store: &Mutex<RecordStore>,
    week_key: &str,
    out_dir: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    let rows = {
        let store = store
            .lock()
            .map_err(|_| anyhow::anyhow!("history lock poisoned"))?;
        match group_for_export(week_key, store.records()) {
            Ok(rows) => rows,
            Err(ExportError::EmptyWeek { .. }) => return Ok(None),
        }
    };

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(export_filename(week_key));
    write_rows(&path, &rows)?;
    tracing::info!(week_key, path = %path.display(), rows = rows.len(), "week exported");
    Ok(Some(path))
}

/// # Errors
///
/// See [`export_week`].
pub(crate) fn run_export(
    store: &Mutex<RecordStore>,
    week_key: &str,
    out_dir: &Path,
) -> anyhow::Result<()> {
    match export_week(store, week_key, out_dir)? {
        Some(path) => println!("exported {}", path.display()),
        None => println!("no routes recorded for week {week_key}; nothing exported"),
    }
    Ok(())
}
