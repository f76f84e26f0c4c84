//! Expense and expense share models
//!
//! Expenses are append-only rows owned by one user. A shared expense may
//! carry shares naming other users and their portion; shares are recorded
//! for information only and never change anyone's spending totals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, ShareId, UserId};
use super::money::Money;
use super::period::MonthPeriod;

/// A single expense paid by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// The user who paid
    pub user_id: UserId,

    pub date: NaiveDate,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Free-form category label, matched exactly
    pub category: String,

    #[serde(default)]
    pub note: String,

    /// Whether the expense was split with other users
    #[serde(default)]
    pub shared: bool,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            date,
            amount,
            category: category.into().trim().to_string(),
            note: String::new(),
            shared: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// The calendar month this expense counts toward
    pub fn period(&self) -> MonthPeriod {
        MonthPeriod::of(self.date)
    }

    /// Check whether this expense belongs to a user/category/month bucket
    pub fn matches(&self, user_id: UserId, category: &str, period: &MonthPeriod) -> bool {
        self.user_id == user_id && self.category == category && period.contains(self.date)
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }
        if self.category.is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount
        )?;
        if !self.note.is_empty() {
            write!(f, " ({})", self.note)?;
        }
        Ok(())
    }
}

/// A portion of a shared expense attributed to another user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub id: ShareId,
    pub expense_id: ExpenseId,
    /// The user the portion is attributed to
    pub user_id: UserId,
    pub amount: Money,
}

impl ExpenseShare {
    pub fn new(expense_id: ExpenseId, user_id: UserId, amount: Money) -> Self {
        Self {
            id: ShareId::new(),
            expense_id,
            user_id,
            amount,
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must not exceed {} (got {})", Money::MAX_AMOUNT, amount)
            }
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let user_id = UserId::new();
        let expense = Expense::new(user_id, date(2025, 12, 5), Money::from_cents(7500), " Food ")
            .with_note("Groceries");

        assert_eq!(expense.category, "Food");
        assert_eq!(expense.note, "Groceries");
        assert!(!expense.shared);
        assert_eq!(expense.period(), MonthPeriod::new(2025, 12).unwrap());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_matches_bucket() {
        let user_id = UserId::new();
        let expense = Expense::new(user_id, date(2025, 12, 5), Money::from_cents(100), "Food");
        let dec = MonthPeriod::new(2025, 12).unwrap();
        let dec_prev_year = MonthPeriod::new(2024, 12).unwrap();

        assert!(expense.matches(user_id, "Food", &dec));
        assert!(!expense.matches(user_id, "food", &dec));
        assert!(!expense.matches(user_id, "Food", &dec_prev_year));
        assert!(!expense.matches(UserId::new(), "Food", &dec));
    }

    #[test]
    fn test_validation() {
        let user_id = UserId::new();
        let zero = Expense::new(user_id, date(2025, 1, 1), Money::zero(), "Food");
        assert_eq!(
            zero.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(Money::zero()))
        );

        let blank = Expense::new(user_id, date(2025, 1, 1), Money::from_cents(1), "  ");
        assert_eq!(blank.validate(), Err(ExpenseValidationError::EmptyCategory));

        let at_max = Expense::new(user_id, date(2025, 1, 1), Money::MAX_AMOUNT, "Food");
        assert!(at_max.validate().is_ok());

        let over = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        let too_large = Expense::new(user_id, date(2025, 1, 1), over, "Food");
        assert_eq!(too_large.validate(), Err(ExpenseValidationError::AmountTooLarge(over)));
    }

    #[test]
    fn test_display() {
        let expense = Expense::new(UserId::new(), date(2025, 10, 5), Money::from_cents(4500), "Food")
            .with_note("Lunch");
        assert_eq!(expense.to_string(), "2025-10-05 Food 45.00 (Lunch)");
    }
}
