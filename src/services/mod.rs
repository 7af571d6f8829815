//! Service layer for Tally
//!
//! The service layer owns the in-memory transaction set and keeps the store
//! in step with it.

pub mod transaction;

pub use transaction::TransactionService;
