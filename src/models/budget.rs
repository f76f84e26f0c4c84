//! Category budget model
//!
//! A monthly spending limit for one user and category. There is at most one
//! budget per (user, category, year, month); setting it again replaces the
//! amount and alert percent in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, UserId};
use super::money::Money;
use super::period::MonthPeriod;

/// A monthly budget for one user's category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub id: BudgetId,

    pub user_id: UserId,

    pub category: String,

    #[serde(flatten)]
    pub period: MonthPeriod,

    /// Spending limit for the month
    pub amount: Money,

    /// Custom low-budget threshold as a percent of `amount`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_percent: Option<u32>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl CategoryBudget {
    /// Create a new budget
    pub fn new(
        user_id: UserId,
        category: impl Into<String>,
        period: MonthPeriod,
        amount: Money,
        alert_percent: Option<u32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            user_id,
            category: category.into().trim().to_string(),
            period,
            amount,
            alert_percent,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the limit and threshold, keeping identity and creation time
    pub fn update(&mut self, amount: Money, alert_percent: Option<u32>) {
        self.amount = amount;
        self.alert_percent = alert_percent;
        self.updated_at = Utc::now();
    }

    /// The alert percent in effect, falling back to the configured default
    pub fn effective_alert_percent(&self, default_percent: u32) -> u32 {
        self.alert_percent.unwrap_or(default_percent)
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeBudget);
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(BudgetValidationError::BudgetTooLarge);
        }
        if self.category.is_empty() {
            return Err(BudgetValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for CategoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.category, self.period, self.amount)?;
        if let Some(pct) = self.alert_percent {
            write!(f, " [alert at {}%]", pct)?;
        }
        Ok(())
    }
}

/// Validation errors for category budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeBudget,
    BudgetTooLarge,
    EmptyCategory,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeBudget => write!(f, "Budget must be non-negative"),
            Self::BudgetTooLarge => write!(f, "Budget must not exceed {}", Money::MAX_AMOUNT),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec_2025() -> MonthPeriod {
        MonthPeriod::new(2025, 12).unwrap()
    }

    #[test]
    fn test_new_budget() {
        let user_id = UserId::new();
        let budget = CategoryBudget::new(user_id, "Food", dec_2025(), Money::from_cents(10000), Some(20));

        assert_eq!(budget.user_id, user_id);
        assert_eq!(budget.effective_alert_percent(10), 20);
        assert!(budget.validate().is_ok());
        assert_eq!(budget.to_string(), "Food (12/2025): 100.00 [alert at 20%]");
    }

    #[test]
    fn test_default_alert_percent() {
        let budget = CategoryBudget::new(UserId::new(), "Food", dec_2025(), Money::from_cents(100), None);
        assert_eq!(budget.effective_alert_percent(10), 10);
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut budget = CategoryBudget::new(UserId::new(), "Food", dec_2025(), Money::from_cents(100), Some(5));
        let id = budget.id;
        let created = budget.created_at;

        budget.update(Money::from_cents(250), None);

        assert_eq!(budget.id, id);
        assert_eq!(budget.created_at, created);
        assert_eq!(budget.amount.cents(), 250);
        assert_eq!(budget.alert_percent, None);
    }

    #[test]
    fn test_validation() {
        let budget = CategoryBudget::new(UserId::new(), "Food", dec_2025(), Money::from_cents(-1), None);
        assert_eq!(budget.validate(), Err(BudgetValidationError::NegativeBudget));

        let zero = CategoryBudget::new(UserId::new(), "Food", dec_2025(), Money::zero(), None);
        assert!(zero.validate().is_ok());

        let over = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        let huge = CategoryBudget::new(UserId::new(), "Food", dec_2025(), over, None);
        assert_eq!(huge.validate(), Err(BudgetValidationError::BudgetTooLarge));
    }

    #[test]
    fn test_serialization_flattens_period() {
        let budget = CategoryBudget::new(UserId::new(), "Food", dec_2025(), Money::from_cents(100), None);
        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["year"], 2025);
        assert_eq!(value["month"], 12);

        let back: CategoryBudget = serde_json::from_value(value).unwrap();
        assert_eq!(back, budget);
    }
}
