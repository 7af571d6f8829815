//! Storage layer for Tally
//!
//! Provides the CSV transaction store and atomic file writes with automatic
//! directory creation.

pub mod file_io;
pub mod transactions;

pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use transactions::{CsvTransactionStore, LoadReport, SkippedRow, TransactionStore, HEADER};

use crate::config::paths::TallyPaths;
use crate::config::settings::Settings;
use crate::error::TallyError;

/// Open the CSV store described by `paths` and `settings`
///
/// Creates the data directories if needed. A `data_file` override in the
/// settings wins over the default location.
pub fn open_store(paths: &TallyPaths, settings: &Settings) -> Result<CsvTransactionStore, TallyError> {
    paths.ensure_directories()?;

    let path = settings
        .data_file
        .clone()
        .unwrap_or_else(|| paths.transactions_file());

    Ok(CsvTransactionStore::new(path).with_header(settings.write_header))
}
