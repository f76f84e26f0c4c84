//! Budget CLI commands

use clap::Args;

use crate::error::ExpenseResult;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::{parse_amount, parse_period};

#[derive(Args, Debug)]
pub struct SetBudgetArgs {
    /// User name
    #[arg(long)]
    pub user: String,

    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub year: i32,

    /// Month number (1-12)
    #[arg(long)]
    pub month: u32,

    /// Budget amount (e.g. "300" or "300.00")
    #[arg(long, allow_hyphen_values = true)]
    pub budget: String,

    /// Alert percent (e.g. 10 for 10%); the configured default applies when omitted
    #[arg(long)]
    pub alert: Option<u32>,
}

/// Handle `set-budget`
pub fn handle_set_budget(storage: &Storage, args: SetBudgetArgs) -> ExpenseResult<()> {
    let period = parse_period(args.year, args.month)?;
    let amount = parse_amount(&args.budget)?;

    BudgetService::new(storage).set_budget(&args.user, &args.category, period, amount, args.alert)?;
    println!("Budget set.");
    Ok(())
}
