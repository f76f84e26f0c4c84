//! Display formatting for terminal output

pub mod alert;
pub mod report;

pub use alert::format_alert;
pub use report::{format_comparison_table, format_monthly_total};
