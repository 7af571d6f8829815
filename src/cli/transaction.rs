//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management. Everything here is
//! presentation: parse arguments, call the service, print the result.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_summary, format_transaction_details, format_transaction_register,
    format_transaction_short,
};
use crate::error::{TallyError, TallyResult};
use crate::models::{
    parse_date, Money, TransactionInput, TransactionPatch, TransactionType,
    TransactionValidationError,
};
use crate::services::TransactionService;
use crate::storage::TransactionStore;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// What the transaction was for
        description: String,
        /// Amount, always positive (e.g., "150.75")
        amount: String,
        /// Transaction type: income or expense
        #[arg(short = 't', long = "type")]
        kind: String,
        /// Category
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all transactions
    #[command(alias = "ls")]
    List {
        /// Show full transaction IDs
        #[arg(long)]
        full_ids: bool,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction; omitted or empty options keep the current value
    Edit {
        /// Transaction ID
        id: String,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New type: income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Show total income, expenses and net balance
    Summary,
}

/// Handle a transaction command
pub fn handle_transaction_command<S: TransactionStore>(
    service: &TransactionService<S>,
    settings: &Settings,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            kind,
            category,
            date,
        } => {
            let date = match date {
                Some(date) => date,
                None => chrono::Local::now().date_naive().to_string(),
            };
            let input = TransactionInput::parse(&date, &description, &amount, &kind, &category)?;

            let txn = service.add(input)?;

            println!("Created transaction:");
            print!("{}", format_transaction_details(&txn, currency));
            warn_if_unsaved(service)?;
        }

        TransactionCommands::List { full_ids } => {
            let transactions = service.list_all()?;
            print!(
                "{}",
                format_transaction_register(&transactions, currency, full_ids)
            );
            println!("\nShowing {} transactions", transactions.len());
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find_by_id(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;

            print!("{}", format_transaction_details(&txn, currency));
        }

        TransactionCommands::Edit {
            id,
            date,
            description,
            amount,
            kind,
            category,
        } => {
            let txn = service
                .find_by_id(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;

            let patch = TransactionPatch {
                date: non_blank(date).map(|d| parse_date(&d)).transpose()?,
                description: non_blank(description),
                amount: non_blank(amount)
                    .map(|a| {
                        Money::parse(&a).map_err(|_| TransactionValidationError::InvalidAmount(a))
                    })
                    .transpose()?,
                kind: non_blank(kind)
                    .map(|k| k.parse::<TransactionType>())
                    .transpose()?,
                category: non_blank(category),
            };

            if patch.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }

            let input = patch.apply_to(&txn);
            input.validate()?;

            if !service.update(&id, input)? {
                return Err(TallyError::transaction_not_found(&id));
            }

            let updated = service
                .find_by_id(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;
            println!("Updated transaction: {}", updated.id());
            println!("  {}", format_transaction_short(&updated, currency));
            warn_if_unsaved(service)?;
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service
                .find_by_id(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;

            if !force {
                println!("About to delete transaction:");
                println!("  {}", format_transaction_short(&txn, currency));
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            if !service.delete(&id)? {
                return Err(TallyError::transaction_not_found(&id));
            }
            println!(
                "Deleted transaction: {} ({})",
                txn.id(),
                format_transaction_short(&txn, currency)
            );
            warn_if_unsaved(service)?;
        }

        TransactionCommands::Summary => {
            let summary = service.summarize()?;
            print!("{}", format_summary(&summary, currency));
        }
    }

    Ok(())
}

/// Tell the user when a change only exists in memory
fn warn_if_unsaved<S: TransactionStore>(service: &TransactionService<S>) -> TallyResult<()> {
    if let Some(err) = service.last_save_error()? {
        eprintln!("Warning: the change could not be saved and will be lost on exit: {}", err);
    }
    Ok(())
}

/// Empty or whitespace-only option values mean "keep the current value"
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CsvTransactionStore;
    use tempfile::TempDir;

    fn create_test_service() -> (TempDir, TransactionService<CsvTransactionStore>) {
        let temp_dir = TempDir::new().unwrap();
        let store = CsvTransactionStore::new(temp_dir.path().join("transactions.csv"));
        (temp_dir, TransactionService::new(store).unwrap())
    }

    fn add(service: &TransactionService<CsvTransactionStore>) -> String {
        handle_transaction_command(
            service,
            &Settings::default(),
            TransactionCommands::Add {
                description: "Groceries".into(),
                amount: "150.75".into(),
                kind: "expense".into(),
                category: "Food".into(),
                date: Some("2025-01-16".into()),
            },
        )
        .unwrap();
        service.list_all().unwrap()[0].id().to_string()
    }

    #[test]
    fn test_add_command() {
        let (_temp_dir, service) = create_test_service();
        add(&service);

        let all = service.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount(), Money::from_cents(15075));
        assert_eq!(all[0].kind(), TransactionType::Expense);
    }

    #[test]
    fn test_add_command_rejects_bad_input() {
        let (_temp_dir, service) = create_test_service();
        let result = handle_transaction_command(
            &service,
            &Settings::default(),
            TransactionCommands::Add {
                description: "Refund".into(),
                amount: "-3".into(),
                kind: "income".into(),
                category: "Misc".into(),
                date: None,
            },
        );

        assert!(result.unwrap_err().is_validation());
        assert_eq!(service.list_all().unwrap().len(), 0);
    }

    #[test]
    fn test_edit_keeps_blank_fields() {
        let (_temp_dir, service) = create_test_service();
        let id = add(&service);

        handle_transaction_command(
            &service,
            &Settings::default(),
            TransactionCommands::Edit {
                id: id.clone(),
                date: None,
                description: Some("  ".into()),
                amount: Some("99.99".into()),
                kind: None,
                category: None,
            },
        )
        .unwrap();

        let txn = service.find_by_id(&id).unwrap().unwrap();
        assert_eq!(txn.description(), "Groceries");
        assert_eq!(txn.amount(), Money::from_cents(9999));
        assert_eq!(txn.category(), "Food");
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let (_temp_dir, service) = create_test_service();
        let result = handle_transaction_command(
            &service,
            &Settings::default(),
            TransactionCommands::Edit {
                id: "missing".into(),
                date: None,
                description: Some("X".into()),
                amount: None,
                kind: None,
                category: None,
            },
        );

        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_requires_force() {
        let (_temp_dir, service) = create_test_service();
        let id = add(&service);

        handle_transaction_command(
            &service,
            &Settings::default(),
            TransactionCommands::Delete {
                id: id.clone(),
                force: false,
            },
        )
        .unwrap();
        assert_eq!(service.list_all().unwrap().len(), 1);

        handle_transaction_command(
            &service,
            &Settings::default(),
            TransactionCommands::Delete { id, force: true },
        )
        .unwrap();
        assert_eq!(service.list_all().unwrap().len(), 0);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" ".into())), None);
        assert_eq!(non_blank(Some("x".into())), Some("x".into()));
        assert_eq!(non_blank(None), None);
    }
}
