//! Spending aggregation
//!
//! Sums a user's expenses per calendar month. Only the paying user's
//! expense amounts count; expense shares never contribute.

use std::collections::BTreeMap;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, MonthPeriod, UserId};
use crate::storage::Storage;

/// Read-only spending queries
pub struct SpendingService<'a> {
    storage: &'a Storage,
}

impl<'a> SpendingService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Total spent by a user in one category (exact label match) and month
    pub fn total_spent(
        &self,
        user_id: UserId,
        category: &str,
        period: &MonthPeriod,
    ) -> ExpenseResult<Money> {
        let expenses = self.storage.expenses.get_for_month(user_id, period)?;
        checked_total(
            expenses
                .iter()
                .filter(|e| e.matches(user_id, category, period))
                .map(|e| e.amount),
        )
    }

    /// Total spent by a user in a month across all categories
    pub fn monthly_total(&self, user_id: UserId, period: &MonthPeriod) -> ExpenseResult<Money> {
        let expenses = self.storage.expenses.get_for_month(user_id, period)?;
        checked_total(expenses.iter().map(|e| e.amount))
    }

    /// Per-category totals for a month; categories without spending are absent
    pub fn spent_by_category(
        &self,
        user_id: UserId,
        period: &MonthPeriod,
    ) -> ExpenseResult<BTreeMap<String, Money>> {
        let mut totals = BTreeMap::new();
        for expense in self.storage.expenses.get_for_month(user_id, period)? {
            let total = totals.entry(expense.category).or_insert_with(Money::zero);
            *total = total.checked_add(expense.amount).ok_or_else(total_overflow)?;
        }
        Ok(totals)
    }
}

fn checked_total(amounts: impl IntoIterator<Item = Money>) -> ExpenseResult<Money> {
    Money::checked_sum(amounts).ok_or_else(total_overflow)
}

fn total_overflow() -> ExpenseError {
    ExpenseError::Validation("Spending total is too large to represent".into())
}
