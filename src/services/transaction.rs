//! Transaction service
//!
//! Owns the authoritative in-memory transaction set. Every mutation runs as
//! one unit under the write lock: change the set, then save the whole set
//! through the store. Readers take the read lock and always see a set that
//! is either fully before or fully after a mutation.

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{TallyError, TallyResult};
use crate::models::{FinancialSummary, Transaction, TransactionInput};
use crate::reports::summary::summarize;
use crate::storage::TransactionStore;

/// Service for transaction management
pub struct TransactionService<S: TransactionStore> {
    store: S,
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    transactions: Vec<Transaction>,
    /// Message of the most recent failed save, cleared by the next good one
    last_save_error: Option<String>,
}

impl<S: TransactionStore> TransactionService<S> {
    /// Create the service, loading the current set from `store`
    ///
    /// Fails if the store cannot be read at all, or if it holds two
    /// transactions with the same id.
    pub fn new(store: S) -> TallyResult<Self> {
        let transactions = store.load()?;

        {
            let mut seen = HashSet::new();
            if let Some(dup) = transactions.iter().find(|t| !seen.insert(t.id().as_str())) {
                return Err(TallyError::duplicate_transaction(dup.id().as_str()));
            }
        }

        tracing::debug!(count = transactions.len(), "transaction service ready");

        Ok(Self {
            store,
            state: RwLock::new(State {
                transactions,
                last_save_error: None,
            }),
        })
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All transactions, in order, as an independent copy
    pub fn list_all(&self) -> TallyResult<Vec<Transaction>> {
        Ok(self.read()?.transactions.clone())
    }

    /// Find a transaction by id
    pub fn find_by_id(&self, id: &str) -> TallyResult<Option<Transaction>> {
        Ok(self
            .read()?
            .transactions
            .iter()
            .find(|t| t.id().as_str() == id)
            .cloned())
    }

    /// Create a transaction from `input`, append it and save
    pub fn add(&self, input: TransactionInput) -> TallyResult<Transaction> {
        self.insert(Transaction::from_input(input))
    }

    /// Append a pre-built transaction and save
    ///
    /// It must pass validation and its id must not already be in the set.
    pub fn insert(&self, txn: Transaction) -> TallyResult<Transaction> {
        txn.validate()?;

        let mut state = self.write()?;

        if state.transactions.iter().any(|t| t.id() == txn.id()) {
            return Err(TallyError::duplicate_transaction(txn.id().as_str()));
        }

        state.transactions.push(txn.clone());
        tracing::info!(id = %txn.id(), "added transaction");
        self.persist(&mut state);

        Ok(txn)
    }

    /// Delete the transaction with `id`
    ///
    /// Returns whether anything was removed. Nothing is saved on a miss.
    pub fn delete(&self, id: &str) -> TallyResult<bool> {
        let mut state = self.write()?;

        let Some(index) = state.transactions.iter().position(|t| t.id().as_str() == id) else {
            tracing::debug!(id, "delete: no such transaction");
            return Ok(false);
        };

        state.transactions.remove(index);
        tracing::info!(id, "deleted transaction");
        self.persist(&mut state);

        Ok(true)
    }

    /// Replace the transaction with `id` by one built from `input`
    ///
    /// The replacement keeps the id and the position in the list. Returns
    /// whether the id was found.
    pub fn update(&self, id: &str, input: TransactionInput) -> TallyResult<bool> {
        input.validate()?;

        let mut state = self.write()?;
        let Some(slot) = state.transactions.iter_mut().find(|t| t.id().as_str() == id) else {
            tracing::debug!(id, "update: no such transaction");
            return Ok(false);
        };

        *slot = Transaction::replacement(slot.id().clone(), input);
        tracing::info!(id, "updated transaction");
        self.persist(&mut state);

        Ok(true)
    }

    /// Income, expense and net totals of the current set
    pub fn summarize(&self) -> TallyResult<FinancialSummary> {
        summarize(&self.read()?.transactions)
    }

    /// Message of the last failed save, if the most recent save failed
    ///
    /// When this is set, the in-memory set is ahead of what is on disk.
    pub fn last_save_error(&self) -> TallyResult<Option<String>> {
        Ok(self.read()?.last_save_error.clone())
    }

    /// Save the set while the caller still holds the write lock
    ///
    /// A failed save does not undo the mutation; the error is logged and
    /// kept for [`Self::last_save_error`].
    fn persist(&self, state: &mut State) {
        match self.store.save(&state.transactions) {
            Ok(()) => state.last_save_error = None,
            Err(e) => {
                tracing::error!(error = %e, "changes kept in memory but not saved");
                state.last_save_error = Some(e.to_string());
            }
        }
    }

    fn read(&self) -> TallyResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TallyResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
