//! Budget service
//!
//! Sets monthly category budgets and evaluates spending against them.

use tracing::debug;

use crate::alerts::{evaluate, BudgetEvaluation};
use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryBudget, Money, MonthPeriod, UserId};
use crate::services::{SpendingService, UserService};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set a user's budget for a category and month
    ///
    /// Replaces any existing budget for the same key, including its alert
    /// percent: omitting `alert_percent` clears a previously set one.
    pub fn set_budget(
        &self,
        user: &str,
        category: &str,
        period: MonthPeriod,
        amount: Money,
        alert_percent: Option<u32>,
    ) -> ExpenseResult<CategoryBudget> {
        let user = UserService::new(self.storage).require(user)?;
        let category = category.trim();

        let existing = self.storage.budgets.get(user.id, category, &period)?;
        let budget = match &existing {
            Some(before) => {
                let mut budget = before.clone();
                budget.update(amount, alert_percent);
                budget
            }
            None => CategoryBudget::new(user.id, category, period, amount, alert_percent),
        };

        budget
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        let label = Some(format!("{} {} {}", user.name, budget.category, budget.period));
        match &existing {
            Some(before) => self.storage.log_update(
                EntityType::CategoryBudget,
                budget.id.to_string(),
                label,
                before,
                &budget,
            )?,
            None => self.storage.log_create(
                EntityType::CategoryBudget,
                budget.id.to_string(),
                label,
                &budget,
            )?,
        }

        debug!(user = %user.name, budget = %budget, replaced = existing.is_some(), "budget set");
        Ok(budget)
    }

    /// Get the budget for a user's category in a month
    pub fn get(
        &self,
        user_id: UserId,
        category: &str,
        period: &MonthPeriod,
    ) -> ExpenseResult<Option<CategoryBudget>> {
        self.storage.budgets.get(user_id, category, period)
    }

    /// Evaluate a category's spending for a month against its budget
    pub fn evaluate(
        &self,
        user_id: UserId,
        category: &str,
        period: &MonthPeriod,
        default_alert_percent: u32,
    ) -> ExpenseResult<BudgetEvaluation> {
        let spent = SpendingService::new(self.storage).total_spent(user_id, category, period)?;
        let budget = self.get(user_id, category, period)?;
        Ok(evaluate(spent, budget.as_ref(), default_alert_percent))
    }
}
