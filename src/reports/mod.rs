//! Reports module for Tally
//!
//! Derived views over the transaction set. Only the aggregate summary is
//! provided.

pub mod summary;

pub use summary::summarize;
