//! Financial summary
//!
//! Income, expense and net totals over a set of transactions. Amounts are
//! summed as exact decimals, so cents never drift.

use crate::error::{TallyError, TallyResult};
use crate::models::{FinancialSummary, Transaction, TransactionType};

/// Summarize `transactions`
///
/// An empty set yields all-zero totals. Fails only if a total does not fit
/// in a `Decimal`, which amounts that passed validation cannot reach.
pub fn summarize(transactions: &[Transaction]) -> TallyResult<FinancialSummary> {
    let mut summary = FinancialSummary::default();

    for txn in transactions {
        let (total, count) = match txn.kind() {
            TransactionType::Income => (&mut summary.total_income, &mut summary.income_count),
            TransactionType::Expense => {
                (&mut summary.total_expenses, &mut summary.expense_count)
            }
        };
        *total = total
            .checked_add(txn.amount())
            .ok_or_else(|| overflow(txn.kind().as_str()))?;
        *count += 1;
    }

    summary.net_balance = summary
        .total_income
        .checked_sub(summary.total_expenses)
        .ok_or_else(|| overflow("net"))?;
    Ok(summary)
}

fn overflow(total: &str) -> TallyError {
    TallyError::Validation(format!("The {} total is too large to compute", total))
}
