//! Report CLI commands

use clap::Args;

use crate::display::{format_comparison_table, format_monthly_total};
use crate::error::ExpenseResult;
use crate::services::ReportService;
use crate::storage::Storage;

use super::parse_period;

/// Arguments naming a user-month
#[derive(Args, Debug)]
pub struct MonthArgs {
    /// User name
    #[arg(long)]
    pub user: String,

    #[arg(long)]
    pub year: i32,

    /// Month number (1-12)
    #[arg(long)]
    pub month: u32,
}

/// Handle `report-monthly`
pub fn handle_report_monthly(storage: &Storage, args: MonthArgs) -> ExpenseResult<()> {
    let period = parse_period(args.year, args.month)?;
    let report = ReportService::new(storage).monthly_total(&args.user, period)?;
    println!("{}", format_monthly_total(&report));
    Ok(())
}

/// Handle `compare-spending`
pub fn handle_compare_spending(storage: &Storage, args: MonthArgs) -> ExpenseResult<()> {
    let period = parse_period(args.year, args.month)?;
    let rows = ReportService::new(storage).compare_spending(&args.user, period)?;
    println!("{}", format_comparison_table(&rows));
    Ok(())
}
