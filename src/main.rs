use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use expense_tracker::cli::{
    handle_add_expense, handle_compare_spending, handle_config, handle_create_user, handle_init,
    handle_report_monthly, handle_set_budget, AddExpenseArgs, CreateUserArgs, InitArgs, MonthArgs,
    SetBudgetArgs,
};
use expense_tracker::config::paths::DATA_DIR_ENV;
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Track expenses against monthly category budgets",
    long_about = "Records expenses per user and category, compares monthly spending \
                  with budgets, and warns (optionally by email) when a budget runs \
                  low or is exceeded."
)]
struct Cli {
    /// Directory holding settings, ledger tables and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a user
    CreateUser(CreateUserArgs),

    /// Set a monthly budget for a user's category
    SetBudget(SetBudgetArgs),

    /// Add an expense and check the category budget
    AddExpense(AddExpenseArgs),

    /// Show total spending for a month
    ReportMonthly(MonthArgs),

    /// Compare spending with budget per category for a month
    CompareSpending(MonthArgs),

    /// Create the data directory, optionally resetting it or loading sample data
    Init(InitArgs),

    /// Show current configuration and paths
    Config,
}

fn init_logging(settings: &Settings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone()));

    // Logs go to stderr so command output stays clean
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn open_storage(paths: ExpensePaths) -> Result<Storage> {
    let mut storage = Storage::new(paths)?;
    storage.load_all()?;
    Ok(storage)
}

fn run(cli: Cli) -> Result<()> {
    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    match cli.command {
        Commands::Init(args) => handle_init(&paths, args)?,
        Commands::Config => handle_config(&paths, &settings)?,
        Commands::CreateUser(args) => handle_create_user(&open_storage(paths)?, args)?,
        Commands::SetBudget(args) => handle_set_budget(&open_storage(paths)?, args)?,
        Commands::AddExpense(args) => {
            handle_add_expense(&open_storage(paths)?, &settings, args)?
        }
        Commands::ReportMonthly(args) => handle_report_monthly(&open_storage(paths)?, args)?,
        Commands::CompareSpending(args) => {
            handle_compare_spending(&open_storage(paths)?, args)?
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
