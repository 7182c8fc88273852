//! Row processor: seeds the catalog from the sheet in a single pass.
//!
//! Rows are handled one at a time, in sheet order. A failing row is logged
//! and recorded in the [`BatchSummary`]; it never stops the batch. Reruns are
//! not idempotent: every run mints new identifiers and creates new datasets,
//! including for rows a previous run already renamed.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::catalog::CatalogApi;
use crate::error::AppError;
use crate::identifier::{build_identifier, TokenSource};
use crate::models::{DatasetRecord, DatasetRow, NAME_COLUMN};
use crate::table::TableStore;

/// Outcome of processing a single data row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// The catalog created the dataset.
    Created { identifier: String },
    /// The catalog answered `success: false`. The sheet keeps the new name.
    Rejected {
        identifier: String,
        message: String,
        error: Value,
    },
    /// A local or transport error stopped this row.
    Failed { error: String },
}

/// Counters for a batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncStats {
    pub created: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl SyncStats {
    /// Creates a new empty stats tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an outcome, incrementing the appropriate counter.
    pub fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Created { .. } => self.created += 1,
            RowOutcome::Rejected { .. } => self.rejected += 1,
            RowOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Returns the total number of processed rows.
    pub fn total(&self) -> usize {
        self.created + self.rejected + self.failed
    }
}

/// Outcome of one row, with its 1-based sheet row number.
#[derive(Debug, Clone, PartialEq)]
pub struct RowReport {
    pub row: usize,
    pub outcome: RowOutcome,
}

/// Everything a batch run did, row by row.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub reports: Vec<RowReport>,
    pub stats: SyncStats,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchSummary {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            reports: Vec::new(),
            stats: SyncStats::new(),
            started_at: now,
            finished_at: now,
        }
    }

    fn add(&mut self, row: usize, outcome: RowOutcome) {
        self.stats.record(&outcome);
        self.reports.push(RowReport { row, outcome });
    }

    /// Identifiers of the datasets the catalog accepted, in sheet order.
    pub fn created_identifiers(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                RowOutcome::Created { identifier } => Some(identifier.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Reports for rows that were rejected or failed.
    pub fn problems(&self) -> impl Iterator<Item = &RowReport> {
        self.reports
            .iter()
            .filter(|r| !matches!(r.outcome, RowOutcome::Created { .. }))
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Processes every data row of `table`, creating one dataset per row.
///
/// The first row is the header and is skipped. Only a failure to read the
/// table is returned as an error; row failures end up in the summary.
pub async fn process_table<T, C>(
    table: &mut T,
    catalog: &C,
    tokens: &mut dyn TokenSource,
) -> Result<BatchSummary, AppError>
where
    T: TableStore + ?Sized,
    C: CatalogApi + ?Sized,
{
    info!("Starting sheet synchronization...");
    let mut summary = BatchSummary::start();

    let snapshot = table.read_all()?;
    let data_rows = snapshot.len().saturating_sub(1);
    info!("Read {} data rows", data_rows);

    for (index, cells) in snapshot.iter().enumerate().skip(1) {
        let row = index + 1;
        info!("Processing row {}...", row);

        let outcome = match process_row(table, catalog, tokens, index, cells).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error on row {}: {}", row, e);
                error!("Full error detail: {:?}", e);
                RowOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        summary.add(row, outcome);
    }

    summary.finished_at = Utc::now();
    info!(
        "Synchronization complete: {} created, {} rejected, {} failed out of {} rows",
        summary.stats.created,
        summary.stats.rejected,
        summary.stats.failed,
        summary.stats.total()
    );

    Ok(summary)
}

async fn process_row<T, C>(
    table: &mut T,
    catalog: &C,
    tokens: &mut dyn TokenSource,
    index: usize,
    cells: &[String],
) -> Result<RowOutcome, AppError>
where
    T: TableStore + ?Sized,
    C: CatalogApi + ?Sized,
{
    let row = DatasetRow::from_cells(cells).map_err(|source| AppError::InvalidRow {
        row: index + 1,
        source,
    })?;

    let token = tokens.next_token();
    let identifier = build_identifier(&row.name, &token);
    info!(
        "Generated unique ID: {} for dataset name: {}",
        token, identifier
    );

    table.write_cell(index, NAME_COLUMN, &identifier)?;

    let record = DatasetRecord::from_row(&row, identifier.clone());
    info!("Prepared payload: {}", serde_json::to_string(&record)?);

    info!("Sending package_create request for {}...", identifier);
    let response = catalog.package_create(&record).await?;

    if response.success {
        info!("Dataset created successfully: {}", identifier);
        return Ok(RowOutcome::Created { identifier });
    }

    let message = response
        .error_message()
        .unwrap_or("catalog reported failure without a message")
        .to_string();
    let error = response.error.unwrap_or(Value::Null);
    warn!("Error creating dataset {}: {}", identifier, message);
    warn!("Full error response: {}", error);

    Ok(RowOutcome::Rejected {
        identifier,
        message,
        error,
    })
}
