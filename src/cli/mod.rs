//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers take the
//! raw strings users type and turn format problems into validation errors.

pub mod budget;
pub mod expense;
pub mod report;
pub mod setup;
pub mod user;

pub use budget::{handle_set_budget, SetBudgetArgs};
pub use expense::{handle_add_expense, AddExpenseArgs};
pub use report::{handle_compare_spending, handle_report_monthly, MonthArgs};
pub use setup::{handle_config, handle_init, InitArgs};
pub use user::{handle_create_user, CreateUserArgs};

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, MonthPeriod};

/// Parse an amount such as "10.50" or "$10.50"
pub(crate) fn parse_amount(input: &str) -> ExpenseResult<Money> {
    Money::parse(input)
        .map_err(|e| ExpenseError::Validation(format!("Invalid amount '{}': {}", input, e)))
}

/// Parse an ISO `YYYY-MM-DD` date
pub(crate) fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD.",
            input
        ))
    })
}

pub(crate) fn parse_period(year: i32, month: u32) -> ExpenseResult<MonthPeriod> {
    MonthPeriod::new(year, month).map_err(|e| ExpenseError::Validation(e.to_string()))
}
