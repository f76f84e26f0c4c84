//! Core data models for the expense tracker
//!
//! Plain records for users, expenses, expense shares and category budgets.
//! Rows reference each other only through typed id fields.

pub mod budget;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod share;
pub mod user;

pub use budget::CategoryBudget;
pub use expense::{Expense, ExpenseShare};
pub use ids::{BudgetId, ExpenseId, ShareId, UserId};
pub use money::Money;
pub use period::MonthPeriod;
pub use share::{parse_shares, ParsedShares, ShareEntry, SkippedShare};
pub use user::User;
