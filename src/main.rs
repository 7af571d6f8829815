use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tally::cli::{handle_transaction_command, TransactionCommands};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::services::TransactionService;
use tally::storage::{open_store, CsvTransactionStore};

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "Tally records dated income and expense transactions in a plain \
                  CSV file and shows what came in, what went out, and what is left."
)]
struct Cli {
    /// Use this transaction file instead of the configured one
    #[arg(long, global = true, env = "TALLY_FILE")]
    file: Option<PathBuf>,

    /// More diagnostic output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tally::logging::init(cli.verbose);

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let store = match &cli.file {
        Some(file) => CsvTransactionStore::new(file).with_header(settings.write_header),
        None => open_store(&paths, &settings)?,
    };

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            let service = TransactionService::new(store)?;
            handle_transaction_command(&service, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("Tally Configuration");
            println!("===================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Data file:        {}", store.path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Header row:      {}", settings.write_header);
        }
        None => {
            println!("Tally - Terminal-based personal finance tracker");
            println!();
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally add <DESCRIPTION> <AMOUNT> -t <TYPE> -c <CATEGORY>' to record a transaction.");
        }
    }

    Ok(())
}
