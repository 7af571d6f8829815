//! Financial summary model
//!
//! Derived totals over a set of transactions. Never persisted.

use serde::Serialize;

use super::money::Money;

/// Income, expense and net totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FinancialSummary {
    /// Sum of all income amounts
    pub total_income: Money,
    /// Sum of all expense amounts
    pub total_expenses: Money,
    /// `total_income - total_expenses`
    pub net_balance: Money,
    /// Number of income transactions
    pub income_count: usize,
    /// Number of expense transactions
    pub expense_count: usize,
}

impl FinancialSummary {
    /// Total number of transactions summarized
    pub fn transaction_count(&self) -> usize {
        self.income_count + self.expense_count
    }

    /// Check if spending exceeds income
    pub fn is_overspent(&self) -> bool {
        self.net_balance.is_negative()
    }
}
