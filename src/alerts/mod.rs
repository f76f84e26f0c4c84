//! Budget alerts
//!
//! The evaluator classifies a month's spending against a category budget;
//! the notifier delivers the resulting message by email.

pub mod evaluator;
pub mod notifier;

pub use evaluator::{evaluate, BudgetEvaluation, BudgetStatus};
pub use notifier::{EmailNotifier, Notifier};

#[cfg(test)]
pub use notifier::{RecordingNotifier, SentMessage};
