//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display:
//! the register table, a detail view, and one-line confirmations.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Transaction, DATE_FORMAT};

const DESCRIPTION_WIDTH: usize = 30;
const CATEGORY_WIDTH: usize = 20;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl RegisterRow {
    fn new(txn: &Transaction, currency: &str, full_ids: bool) -> Self {
        let id = if full_ids {
            txn.id().to_string()
        } else {
            txn.id().short().to_string()
        };

        Self {
            id,
            date: txn.date().format(DATE_FORMAT).to_string(),
            description: truncate(txn.description(), DESCRIPTION_WIDTH),
            amount: txn.amount().format_with_symbol(currency),
            kind: txn.kind().to_string(),
            category: truncate(txn.category(), CATEGORY_WIDTH),
        }
    }
}

/// Format a list of transactions as a register table
///
/// With `full_ids` unset, ids are shortened to their first eight
/// characters; `show`, `edit` and `delete` accept the full id only.
pub fn format_transaction_register(
    transactions: &[Transaction],
    currency: &str,
    full_ids: bool,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|txn| RegisterRow::new(txn, currency, full_ids));

    let mut table = Table::new(rows);
    table.with(Style::psql());

    let mut output = table.to_string();
    output.push('\n');
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id()));
    output.push_str(&format!("Date:        {}\n", txn.date().format(DATE_FORMAT)));
    output.push_str(&format!("Description: {}\n", txn.description()));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount().format_with_symbol(currency)
    ));
    output.push_str(&format!("Type:        {}\n", txn.kind()));
    output.push_str(&format!("Category:    {}\n", txn.category()));

    output
}

/// Format a short transaction summary (one line)
pub fn format_transaction_short(txn: &Transaction, currency: &str) -> String {
    format!(
        "{} {} {} {} ({})",
        txn.date().format(DATE_FORMAT),
        txn.kind(),
        txn.amount().format_with_symbol(currency),
        txn.description(),
        txn.category()
    )
}

/// Truncate a string to at most `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
