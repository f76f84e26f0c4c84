//! Monthly reports

use crate::error::ExpenseResult;
use crate::models::{Money, MonthPeriod, User};
use crate::services::{SpendingService, UserService};
use crate::storage::Storage;

/// Spending against budget for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryComparison {
    pub category: String,
    pub spent: Money,
    /// Zero when no budget is set
    pub budget: Money,
    /// `budget - spent`; negative when over budget
    pub remaining: Money,
}

/// Total spending for a user-month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub user: User,
    pub period: MonthPeriod,
    pub total: Money,
}

/// Service for monthly reports
pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Total spending across all categories for a month
    pub fn monthly_total(&self, user: &str, period: MonthPeriod) -> ExpenseResult<MonthlyTotal> {
        let user = UserService::new(self.storage).require(user)?;
        let total = SpendingService::new(self.storage).monthly_total(user.id, &period)?;
        Ok(MonthlyTotal {
            user,
            period,
            total,
        })
    }

    /// Spent vs budget for each category with spending in the month,
    /// ordered by category name
    pub fn compare_spending(
        &self,
        user: &str,
        period: MonthPeriod,
    ) -> ExpenseResult<Vec<CategoryComparison>> {
        let user = UserService::new(self.storage).require(user)?;
        let spent = SpendingService::new(self.storage).spent_by_category(user.id, &period)?;

        spent
            .into_iter()
            .map(|(category, spent)| -> ExpenseResult<CategoryComparison> {
                let budget = self
                    .storage
                    .budgets
                    .get(user.id, &category, &period)?
                    .map(|b| b.amount)
                    .unwrap_or_default();
                Ok(CategoryComparison {
                    category,
                    spent,
                    budget,
                    remaining: budget - spent,
                })
            })
            .collect()
    }
}
