use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use spendboard::audit::AuditLogger;
use spendboard::cli::{
    handle_budget_command, handle_config_command, handle_dashboard_command,
    handle_expense_command, handle_history_command, BudgetCommands, ConfigArgs, DashboardArgs,
    ExpenseCommands, HistoryScope,
};
use spendboard::clock::SystemClock;
use spendboard::config::{Settings, SpendboardPaths};
use spendboard::services::ExpenseStore;
use spendboard::storage::open_json;

#[derive(Parser)]
#[command(
    name = "spendboard",
    version,
    about = "Personal expense tracking with budget progress in the terminal",
    long_about = "Spendboard records day-to-day expenses, totals them by day, week \
                  and month, and checks each category against a monthly budget."
)]
struct Cli {
    /// Log diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show totals, budget progress and charts
    Dashboard(DashboardArgs),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,

        /// Only show changes to expenses or to the budget
        #[arg(long, value_enum)]
        only: Option<HistoryScope>,
    },

    /// Show or change configuration
    Config(ConfigArgs),
}

/// Install the stderr subscriber. `RUST_LOG` wins when set; otherwise only
/// this crate logs, at `level`.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// JSON providers under the data directory, with auditing
fn open_store(paths: &SpendboardPaths) -> Result<ExpenseStore> {
    let (expenses, budgets) = open_json(paths)?;
    let store = ExpenseStore::open(Box::new(expenses), Box::new(budgets))?
        .with_audit(AuditLogger::new(paths.audit_log()));
    Ok(store)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    });

    let paths = SpendboardPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    let clock = SystemClock;
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Dashboard(DashboardArgs::default()));

    match command {
        Commands::Expense(cmd) => {
            let mut store = open_store(&paths)?;
            handle_expense_command(&mut store, &settings, &clock, cmd)?;
        }
        Commands::Budget(cmd) => {
            let mut store = open_store(&paths)?;
            handle_budget_command(&mut store, &settings, &clock, cmd)?;
        }
        Commands::Dashboard(args) => {
            let store = open_store(&paths)?;
            handle_dashboard_command(&store, &settings, &clock, args)?;
        }
        Commands::History { count, only } => {
            handle_history_command(&paths, count, only)?;
        }
        Commands::Config(args) => {
            handle_config_command(&paths, &mut settings, args)?;
        }
    }

    Ok(())
}
