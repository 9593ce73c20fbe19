//! CSV Export and Import
//!
//! Export writes `Name,URL,Time` followed by one comma-joined row per hit.
//! Fields are written as-is: a value containing a comma shifts the columns of
//! its row. Import reads such a file back with the `csv` crate, treating the
//! first two fields as name and URL and everything after them as the time.

use crate::storage::{Hit, StoreError, StoreResult};
use std::io::Read;
use std::path::Path;

/// File name offered for downloads
pub const EXPORT_FILE_NAME: &str = "hits.csv";

/// Header row of the export
pub const CSV_HEADER: &str = "Name,URL,Time";

/// Content type for the export
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// Render hits as CSV text
pub fn to_csv<'a>(hits: impl IntoIterator<Item = &'a Hit>) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    let rows: Vec<String> = hits
        .into_iter()
        .map(|h| format!("{},{},{}", h.name(), h.url(), h.time()))
        .collect();
    csv.push_str(&rows.join("\n"));

    csv
}

/// Write the export to a file
pub fn write_csv<'a>(path: &Path, hits: impl IntoIterator<Item = &'a Hit>) -> StoreResult<usize> {
    let hits: Vec<&Hit> = hits.into_iter().collect();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_csv(hits.iter().copied()))?;

    tracing::info!(path = ?path, rows = hits.len(), "Exported hits");
    Ok(hits.len())
}

/// Result of reading an exported file
#[derive(Debug, Default)]
pub struct CsvImportResult {
    pub hits: Vec<Hit>,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

/// Parse exported CSV text back into hits.
///
/// The header must be `Name,URL,Time`. Rows with fewer than three fields are
/// counted as failures and reported in `errors`; the rest are returned in file
/// order.
pub fn read_csv<R: Read>(reader: R) -> StoreResult<CsvImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = reader.headers()?.iter().collect::<Vec<_>>().join(",");
    if header != CSV_HEADER {
        return Err(StoreError::InvalidRow {
            line: 1,
            reason: format!("expected header {:?}, found {:?}", CSV_HEADER, header),
        });
    }

    let mut result = CsvImportResult::default();

    for record in reader.records() {
        let record = record?;
        result.rows_processed += 1;

        match parse_row(&record) {
            Ok(hit) => result.hits.push(hit),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping CSV row");
                result.rows_failed += 1;
                result.errors.push(e.to_string());
            }
        }
    }

    Ok(result)
}

/// Parse an exported file from disk
pub fn import_file(path: &Path) -> StoreResult<CsvImportResult> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

fn parse_row(record: &csv::StringRecord) -> StoreResult<Hit> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);

    if record.len() < 3 {
        return Err(StoreError::InvalidRow {
            line,
            reason: format!("expected 3 fields, found {}", record.len()),
        });
    }

    // The default timestamp carries a comma of its own
    let time = record.iter().skip(2).collect::<Vec<_>>().join(",");
    Ok(Hit::new(&record[0], &record[1], time))
}
