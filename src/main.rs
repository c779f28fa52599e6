use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use spendwise::cli::{
    handle_budget_command, handle_entry_command, handle_history_command, BudgetCommands,
    EntryCommands, HistoryArgs,
};
use spendwise::config::{paths::SpendwisePaths, settings::Settings};
use spendwise::services::BudgetStore;
use spendwise::storage::{FileStore, MemoryStore, RecordStore};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "SPENDWISE_LOG";

#[derive(Parser)]
#[command(
    name = "spendwise",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based spending tracker",
    long_about = "Spendwise keeps a running total per budget category as you record \
                  what you spend, and shows your recent history. Swipe an entry \
                  sideways in the TUI to delete it."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Budget category commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Spending entry commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Show recorded spending in a date range
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("spendwise=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Open the on-disk store, or a session-only one if the data directory is unusable
fn open_store(paths: &SpendwisePaths) -> BudgetStore {
    let backend: Box<dyn RecordStore> = match FileStore::new(paths.clone()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "data directory unavailable, changes will not be saved");
            Box::new(MemoryStore::new())
        }
    };
    BudgetStore::open(backend)
}

/// Open the store for a CLI command, reporting records that could not be read
fn open_store_reporting(paths: &SpendwisePaths) -> BudgetStore {
    let store = open_store(paths);
    for notice in store.load_notices() {
        eprintln!("Warning: {}", notice);
    }
    store
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console logging would draw over the TUI
    if !matches!(cli.command, Some(Commands::Tui)) {
        init_logging(cli.verbose);
    }

    let paths = SpendwisePaths::new()?;
    let settings = Settings::load_or_create(&paths).unwrap_or_else(|e| {
        warn!(error = %e, "using default settings");
        Settings::default()
    });

    match cli.command {
        Some(Commands::Tui) => {
            let mut store = open_store(&paths);
            spendwise::tui::run_tui(&mut store, &settings)?;
        }
        Some(Commands::Budget(cmd)) => {
            let mut store = open_store_reporting(&paths);
            handle_budget_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Entry(cmd)) => {
            let mut store = open_store_reporting(&paths);
            handle_entry_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::History(args)) => {
            let store = open_store_reporting(&paths);
            handle_history_command(&store, &settings, args)?;
        }
        Some(Commands::Config) => {
            println!("Spendwise Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            match Settings::ensure_saved(&paths) {
                Ok(true) => println!("                  (created with defaults)"),
                Ok(false) => {}
                Err(e) => warn!(error = %e, "could not write default settings"),
            }
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  History window:  {} days", settings.history_days);
            println!("  Cell width:      {} px", settings.cell_width_px);
        }
        None => {
            println!("Spendwise - Terminal-based spending tracker");
            println!();
            println!("Run 'spendwise --help' for usage information.");
            println!("Run 'spendwise tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
