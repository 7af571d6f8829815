//! Tally - Terminal-based personal finance tracker
//!
//! This library provides the core functionality for the Tally finance
//! tracker: recording dated income and expense transactions, persisting them
//! to a CSV file, and deriving income/expense/net totals.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Diagnostic subscriber setup for the binary
//! - `models`: Core data models (transactions, money, summaries)
//! - `storage`: CSV file storage layer
//! - `services`: Business logic layer
//! - `reports`: Derived totals
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::models::TransactionInput;
//! use tally::services::TransactionService;
//! use tally::storage::CsvTransactionStore;
//!
//! let service = TransactionService::new(CsvTransactionStore::new("transactions.csv"))?;
//! let input = TransactionInput::parse("2025-01-15", "Salary", "1000.00", "INCOME", "Work")?;
//! service.add(input)?;
//! println!("{:?}", service.summarize()?);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
