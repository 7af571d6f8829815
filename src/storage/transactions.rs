//! Transaction store backed by a CSV file
//!
//! The whole transaction set is written as one snapshot per save, one
//! record per line:
//!
//! ```text
//! ID,Date,Description,Amount,Type,Category
//! 9b1d...,2025-01-15,Salary,5000.00,INCOME,Work
//! ```
//!
//! Fields are quoted only when they contain a comma, quote or line break, so
//! free text with delimiters survives a round trip.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{TallyError, TallyResult};
use crate::models::{parse_date, Money, Transaction, TransactionId, TransactionType, DATE_FORMAT};

use super::file_io::write_atomic;

/// Column names of the optional header row
pub const HEADER: [&str; 6] = ["ID", "Date", "Description", "Amount", "Type", "Category"];

/// Loads and saves the complete transaction set
///
/// A store holds no state of its own between calls: `load` reads whatever
/// was last saved and `save` replaces it wholesale.
pub trait TransactionStore {
    /// Read every stored transaction, in stored order
    ///
    /// A store that has never been written yields an empty list. Rows that
    /// cannot be understood are skipped rather than failing the whole load.
    fn load(&self) -> TallyResult<Vec<Transaction>>;

    /// Replace the stored set with `transactions`
    fn save(&self, transactions: &[Transaction]) -> TallyResult<()>;
}

/// A stored row that was skipped during load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file
    pub line: u64,
    /// Why the row was rejected
    pub reason: String,
}

/// Result of reading a CSV file: the good rows plus what was skipped
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRow>,
}

/// CSV file implementation of [`TransactionStore`]
#[derive(Debug, Clone)]
pub struct CsvTransactionStore {
    path: PathBuf,
    write_header: bool,
}

impl CsvTransactionStore {
    /// Create a store for the file at `path` (which need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_header: true,
        }
    }

    /// Whether `save` writes a header row first (default: yes)
    pub fn with_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, keeping track of every row that had to be skipped
    pub fn load_report(&self) -> TallyResult<LoadReport> {
        let mut report = LoadReport::default();

        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no transaction file yet");
            return Ok(report);
        }

        let file = File::open(&self.path).map_err(|e| {
            TallyError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut record = StringRecord::new();
        let mut first = true;
        loop {
            let line = reader.position().line();
            match reader.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {}
                Err(e) if e.is_io_error() => {
                    return Err(TallyError::Storage(format!(
                        "Failed to read {}: {}",
                        self.path.display(),
                        e
                    )));
                }
                Err(e) => {
                    report.skip(line, e.to_string());
                    first = false;
                    continue;
                }
            }

            let line = record.position().map(|p| p.line()).unwrap_or(line);
            if std::mem::take(&mut first) && is_header(&record) {
                continue;
            }

            match parse_record(&record) {
                Ok(txn) => report.transactions.push(txn),
                Err(reason) => report.skip(line, reason),
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            loaded = report.transactions.len(),
            skipped = report.skipped.len(),
            "loaded transactions"
        );
        Ok(report)
    }
}

impl LoadReport {
    fn skip(&mut self, line: u64, reason: String) {
        tracing::warn!(line, %reason, "skipping malformed transaction row");
        self.skipped.push(SkippedRow { line, reason });
    }
}

impl TransactionStore for CsvTransactionStore {
    fn load(&self) -> TallyResult<Vec<Transaction>> {
        Ok(self.load_report()?.transactions)
    }

    fn save(&self, transactions: &[Transaction]) -> TallyResult<()> {
        write_atomic(&self.path, |out| {
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);

            if self.write_header {
                writer.write_record(HEADER)?;
            }
            for txn in transactions {
                writer.write_record(to_record(txn))?;
            }
            writer.flush()?;
            Ok(())
        })
        .map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "failed to save transactions");
            e
        })?;

        tracing::debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "saved transactions"
        );
        Ok(())
    }
}

fn is_header(record: &StringRecord) -> bool {
    record.len() == HEADER.len()
        && record
            .iter()
            .zip(HEADER)
            .all(|(field, name)| field.trim().eq_ignore_ascii_case(name))
}

fn to_record(txn: &Transaction) -> [String; 6] {
    [
        txn.id().to_string(),
        txn.date().format(DATE_FORMAT).to_string(),
        txn.description().to_string(),
        txn.amount().to_plain_string(),
        txn.kind().as_str().to_string(),
        txn.category().to_string(),
    ]
}

fn parse_record(record: &StringRecord) -> Result<Transaction, String> {
    if record.len() != HEADER.len() {
        return Err(format!(
            "expected {} fields, found {}",
            HEADER.len(),
            record.len()
        ));
    }

    let id = &record[0];
    let date = parse_date(&record[1]).map_err(|e| e.to_string())?;
    let amount = Money::parse(&record[3]).map_err(|e| e.to_string())?;
    let kind = TransactionType::from_name(&record[4])
        .ok_or_else(|| format!("unknown transaction type '{}'", &record[4]))?;

    if id.trim().is_empty() {
        tracing::warn!("stored transaction has no id, generating one");
    }

    let txn = Transaction::with_id(
        TransactionId::from_raw(id),
        date,
        &record[2],
        amount,
        kind,
        &record[5],
    );
    txn.validate().map_err(|e| e.to_string())?;
    Ok(txn)
}
