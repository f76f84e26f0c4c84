//! Expense tracker with monthly category budgets and alerts
//!
//! Users record expenses by category; each month's spending is compared to
//! per-category budgets, and a notice or alert is raised (and optionally
//! emailed) when a budget runs low or is exceeded.
//!
//! # Architecture
//!
//! - `config`: Paths and settings
//! - `error`: Custom error types
//! - `models`: Users, expenses, shares, budgets, money and months
//! - `storage`: JSON table storage with atomic writes
//! - `audit`: Append-only audit log
//! - `services`: Business logic for each command
//! - `alerts`: Budget evaluation and email notification
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod alerts;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
