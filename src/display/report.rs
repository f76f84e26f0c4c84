//! Report formatting for terminal output

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::services::{CategoryComparison, MonthlyTotal};

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

impl From<&CategoryComparison> for ComparisonRow {
    fn from(c: &CategoryComparison) -> Self {
        Self {
            category: c.category.clone(),
            spent: c.spent.to_string(),
            budget: c.budget.to_string(),
            remaining: c.remaining.to_string(),
        }
    }
}

/// One-line monthly total
pub fn format_monthly_total(report: &MonthlyTotal) -> String {
    format!(
        "Total spending for {} in {}: {}",
        report.user.name, report.period, report.total
    )
}

/// Spent vs budget table, one row per category
///
/// The header is printed even when there are no rows.
pub fn format_comparison_table(rows: &[CategoryComparison]) -> String {
    let rows: Vec<ComparisonRow> = rows.iter().map(ComparisonRow::from).collect();

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}
