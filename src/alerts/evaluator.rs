//! Budget evaluation
//!
//! Compares a month's total spend for one category against its budget and
//! classifies the result. Comparisons are done in integer cents, so a spend
//! exactly equal to the budget is never "exceeded" and the low-budget
//! threshold has no rounding slack.

use crate::models::{CategoryBudget, Money};

/// Classification of spending against a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// No budget is set for the category and month
    NoBudget,
    /// Remaining funds are above the alert threshold
    Ok,
    /// Remaining funds are at or below the alert threshold
    LowRemaining,
    /// Spending is strictly greater than the budget
    Exceeded,
}

impl BudgetStatus {
    /// Email subject for statuses that warrant a notification
    pub fn alert_subject(&self) -> Option<&'static str> {
        match self {
            Self::Exceeded => Some("Budget exceeded"),
            Self::LowRemaining => Some("Low budget notice"),
            Self::NoBudget | Self::Ok => None,
        }
    }

    pub fn is_alert(&self) -> bool {
        self.alert_subject().is_some()
    }
}

/// Result of evaluating spend against a budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetEvaluation {
    pub status: BudgetStatus,
    /// User-facing alert text, present only for alert statuses
    pub message: Option<String>,
}

impl BudgetEvaluation {
    fn quiet(status: BudgetStatus) -> Self {
        Self {
            status,
            message: None,
        }
    }
}

/// Evaluate `total_spent` against `budget`
///
/// The budget's own alert percent is used when set, otherwise
/// `default_alert_percent`.
pub fn evaluate(
    total_spent: Money,
    budget: Option<&CategoryBudget>,
    default_alert_percent: u32,
) -> BudgetEvaluation {
    let Some(budget) = budget else {
        return BudgetEvaluation::quiet(BudgetStatus::NoBudget);
    };

    if total_spent > budget.amount {
        return BudgetEvaluation {
            status: BudgetStatus::Exceeded,
            message: Some(format!(
                "ALERT: You exceeded budget for {} ({}). Spent {}, budget {}",
                budget.category, budget.period, total_spent, budget.amount
            )),
        };
    }

    let remaining = budget.amount - total_spent;
    let percent = budget.effective_alert_percent(default_alert_percent);

    // remaining <= amount * percent / 100, without dividing
    let threshold_hit =
        i128::from(remaining.cents()) * 100 <= i128::from(budget.amount.cents()) * i128::from(percent);

    if threshold_hit {
        BudgetEvaluation {
            status: BudgetStatus::LowRemaining,
            message: Some(format!(
                "NOTICE: Only {} left in budget for {} ({})",
                remaining, budget.category, budget.period
            )),
        }
    } else {
        BudgetEvaluation::quiet(BudgetStatus::Ok)
    }
}
