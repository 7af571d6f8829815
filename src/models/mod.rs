//! Core data models for Tally
//!
//! This module contains the data structures of the finance domain:
//! transactions, their identifiers, money amounts and derived summaries.

pub mod ids;
pub mod money;
pub mod summary;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use summary::FinancialSummary;
pub use transaction::{
    parse_date, Transaction, TransactionInput, TransactionPatch, TransactionType,
    TransactionValidationError, DATE_FORMAT,
};
