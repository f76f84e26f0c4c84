//! Service layer for the expense tracker
//!
//! Services hold a borrowed `Storage` handle and implement the operations
//! behind each command: validation, persistence, audit logging and budget
//! evaluation.

pub mod budget;
pub mod expense;
pub mod report;
pub mod spending;
pub mod user;

pub use budget::BudgetService;
pub use expense::{ExpenseOutcome, ExpenseService, NewExpense};
pub use report::{CategoryComparison, MonthlyTotal, ReportService};
pub use spending::SpendingService;
pub use user::UserService;
