//! Expense CLI commands

use std::io::IsTerminal;

use clap::Args;

use crate::alerts::EmailNotifier;
use crate::config::Settings;
use crate::display::format_alert;
use crate::error::ExpenseResult;
use crate::services::{ExpenseService, NewExpense};
use crate::storage::Storage;

use super::{parse_amount, parse_date};

#[derive(Args, Debug)]
pub struct AddExpenseArgs {
    /// User name
    #[arg(long)]
    pub user: String,

    /// Amount spent (e.g. "12.50")
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,

    #[arg(long)]
    pub category: String,

    /// Expense date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, default_value = "")]
    pub note: String,

    /// Mark as a shared expense
    #[arg(long)]
    pub shared: bool,

    /// Split list of user:amount pairs, e.g. "Bob:10,Alice:5"
    #[arg(long, default_value = "")]
    pub shares: String,
}

/// Handle `add-expense`
pub fn handle_add_expense(
    storage: &Storage,
    settings: &Settings,
    args: AddExpenseArgs,
) -> ExpenseResult<()> {
    let mut input = NewExpense::new(args.user, parse_amount(&args.amount)?, args.category)
        .with_note(args.note);
    if let Some(date) = args.date.as_deref() {
        input = input.on(parse_date(date)?);
    }
    input.shared = args.shared;
    input.shares = args.shares;

    let outcome = ExpenseService::new(storage).add(input, settings.default_alert_percent)?;

    println!("Expense added.");
    if !outcome.shares.is_empty() {
        println!("Recorded {} share(s).", outcome.shares.len());
    }

    if let Some(line) = format_alert(&outcome.evaluation, std::io::stdout().is_terminal()) {
        println!("{}", line);
        outcome.notify(&EmailNotifier::new(settings.email.clone()));
    }

    Ok(())
}
