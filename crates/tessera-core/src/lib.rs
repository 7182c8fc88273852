//! Tessera Core - Domain types, row parsing, error handling, and the row processor.

pub mod catalog;
pub mod config;
pub mod error;
pub mod identifier;
pub mod models;
pub mod parse;
pub mod sync;
pub mod table;

pub use catalog::{ActionResponse, CatalogApi};
pub use config::{
    default_config_path, load_file_config, FileConfig, HttpConfig, Overrides, RunConfig,
    DEFAULT_CATALOG_URL,
};
pub use error::AppError;
pub use identifier::{build_identifier, TokenSource, UuidTokens, MAX_IDENTIFIER_LEN};
pub use models::{DatasetRecord, DatasetRow, Extra, Resource, RowError, Tag};
pub use sync::{process_table, BatchSummary, RowOutcome, RowReport, SyncStats};
pub use table::{MemoryTable, TableStore};
