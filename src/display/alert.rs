//! Alert formatting
//!
//! Exceeded budgets are shown in red, low-remaining notices in yellow.

use crate::alerts::{BudgetEvaluation, BudgetStatus};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Format the alert line for an evaluation, if it carries one
///
/// Color codes are only emitted when `color` is set.
pub fn format_alert(evaluation: &BudgetEvaluation, color: bool) -> Option<String> {
    let message = evaluation.message.as_deref()?;
    let code = match evaluation.status {
        BudgetStatus::Exceeded => RED,
        BudgetStatus::LowRemaining => YELLOW,
        BudgetStatus::NoBudget | BudgetStatus::Ok => return Some(message.to_string()),
    };

    if color {
        Some(format!("{}{}{}", code, message, RESET))
    } else {
        Some(message.to_string())
    }
}
