//! Setup CLI commands: `init` and `config`

use clap::Args;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::storage::{initialize_storage, seed_sample_data, Storage};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Delete all existing users, expenses, shares and budgets first
    #[arg(long)]
    pub drop: bool,

    /// Load sample users, budgets and an expense
    #[arg(long)]
    pub sample: bool,
}

/// Handle `init`
pub fn handle_init(paths: &ExpensePaths, args: InitArgs) -> ExpenseResult<()> {
    println!("Initializing expense tracker at: {}", paths.base_dir().display());

    let removed = initialize_storage(paths, args.drop)?;
    if args.drop {
        println!("Dropped {} table(s).", removed);
    }

    if args.sample {
        let mut storage = Storage::new(paths.clone())?;
        storage.load_all()?;
        let summary = seed_sample_data(&storage)?;
        println!(
            "Sample data loaded: {} users, {} budgets, {} expense(s).",
            summary.users, summary.budgets, summary.expenses
        );
    }

    println!("Initialization complete!");
    Ok(())
}

/// Handle `config`
pub fn handle_config(paths: &ExpensePaths, settings: &Settings) -> ExpenseResult<()> {
    let email = &settings.email;
    let or_unset = |value: &str| {
        if value.is_empty() {
            "(not set)".to_string()
        } else {
            value.to_string()
        }
    };

    println!("Expense Tracker Configuration");
    println!("=============================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Default alert percent: {}%", settings.default_alert_percent);
    println!("  Log level:             {}", settings.log_level);
    println!();
    println!("Email:");
    println!("  SMTP host:  {}", or_unset(&email.smtp_host));
    println!("  SMTP port:  {}", email.effective_port());
    println!("  SMTP user:  {}", or_unset(&email.smtp_user));
    println!(
        "  SMTP pass:  {}",
        if email.smtp_pass.is_empty() { "(not set)" } else { "********" }
    );
    println!("  From:       {}", or_unset(&email.from_email));
    println!(
        "  Status:     {}",
        if email.is_configured() { "enabled" } else { "disabled" }
    );
    Ok(())
}
