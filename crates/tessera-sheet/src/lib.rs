//! Tessera Sheet - spreadsheet storage for the row processor.
//!
//! Provides [`CsvSheet`], a [`tessera_core::TableStore`] over a CSV file.

pub mod csv_sheet;

pub use csv_sheet::CsvSheet;
