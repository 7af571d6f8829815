//! Report formatting for terminal output

use crate::models::FinancialSummary;

const LABEL_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 14;

/// Format the financial summary block
pub fn format_summary(summary: &FinancialSummary, currency: &str) -> String {
    let width = LABEL_WIDTH + VALUE_WIDTH;
    let line = |label: &str, value: String| format!("{:<LABEL_WIDTH$}{:>VALUE_WIDTH$}\n", label, value);

    let mut output = String::new();
    output.push_str("Financial Summary\n");
    output.push_str(&separator(width));
    output.push('\n');
    output.push_str(&line(
        "Total Income:",
        summary.total_income.format_with_symbol(currency),
    ));
    output.push_str(&line(
        "Total Expenses:",
        summary.total_expenses.format_with_symbol(currency),
    ));
    output.push_str(&separator(width));
    output.push('\n');
    output.push_str(&line(
        "Net Balance:",
        summary.net_balance.format_with_symbol(currency),
    ));
    output.push_str(&separator(width));
    output.push('\n');
    output.push_str(&format!(
        "{} transaction(s): {} income, {} expense\n",
        summary.transaction_count(),
        summary.income_count,
        summary.expense_count
    ));
    if summary.is_overspent() {
        output.push_str("Spending exceeds income.\n");
    }

    output
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_format_summary() {
        let summary = FinancialSummary {
            total_income: Money::parse("1000.00").unwrap(),
            total_expenses: Money::parse("135.50").unwrap(),
            net_balance: Money::parse("864.50").unwrap(),
            income_count: 1,
            expense_count: 2,
        };

        let formatted = format_summary(&summary, "$");
        assert!(formatted.contains("Total Income:"));
        assert!(formatted.contains("$1000.00"));
        assert!(formatted.contains("$135.50"));
        assert!(formatted.contains("$864.50"));
        assert!(formatted.contains("3 transaction(s): 1 income, 2 expense"));
        assert!(!formatted.contains("exceeds"));
    }

    #[test]
    fn test_format_negative_net() {
        let summary = FinancialSummary {
            net_balance: Money::from_cents(-250),
            ..Default::default()
        };

        let formatted = format_summary(&summary, "$");
        assert!(formatted.contains("-$2.50"));
        assert!(formatted.contains("Spending exceeds income."));
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator(3), "───");
    }
}
