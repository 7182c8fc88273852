//! Dry rendering of the payloads a sync would send.

use tessera_core::error::AppError;
use tessera_core::identifier::{build_identifier, TokenSource};
use tessera_core::models::{DatasetRecord, DatasetRow};

use crate::config::PreviewFormat;

/// Builds a record for every valid data row of `rows`, header skipped.
///
/// Invalid rows are returned as errors next to the records instead of
/// stopping the preview.
pub fn build_records(
    rows: &[Vec<String>],
    tokens: &mut dyn TokenSource,
) -> (Vec<DatasetRecord>, Vec<AppError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (index, cells) in rows.iter().enumerate().skip(1) {
        match DatasetRow::from_cells(cells) {
            Ok(row) => {
                let identifier = build_identifier(&row.name, &tokens.next_token());
                records.push(DatasetRecord::from_row(&row, identifier));
            }
            Err(source) => errors.push(AppError::InvalidRow {
                row: index + 1,
                source,
            }),
        }
    }

    (records, errors)
}

/// Serializes `records` in the requested format.
pub fn render(records: &[DatasetRecord], format: PreviewFormat) -> Result<String, AppError> {
    match format {
        PreviewFormat::Jsonl => {
            let mut out = String::new();
            for record in records {
                out.push_str(&serde_json::to_string(record)?);
                out.push('\n');
            }
            Ok(out)
        }
        PreviewFormat::Json => Ok(serde_json::to_string_pretty(records)? + "\n"),
    }
}
