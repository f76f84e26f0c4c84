//! Category budget repository for JSON storage
//!
//! Manages loading and saving category budgets to budgets.json. Budgets are
//! keyed by (user, category, month), so an upsert can never create a second
//! row for the same key.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{CategoryBudget, MonthPeriod, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget table
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<CategoryBudget>,
}

/// Composite key for category budgets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub user_id: UserId,
    pub category: String,
    pub period: MonthPeriod,
}

impl BudgetKey {
    pub fn new(user_id: UserId, category: impl Into<String>, period: MonthPeriod) -> Self {
        Self {
            user_id,
            category: category.into(),
            period,
        }
    }

    fn of(budget: &CategoryBudget) -> Self {
        Self::new(budget.user_id, budget.category.clone(), budget.period)
    }
}

/// Repository for category budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, CategoryBudget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    ///
    /// If the file somehow holds two rows for one key, the later row wins.
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(BudgetKey::of(&budget), budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = BudgetData {
            budgets: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the budget for a user's category in a month
    pub fn get(
        &self,
        user_id: UserId,
        category: &str,
        period: &MonthPeriod,
    ) -> Result<Option<CategoryBudget>, ExpenseError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets
            .get(&BudgetKey::new(user_id, category, *period))
            .cloned())
    }

    /// Get all of a user's budgets for a month, sorted by category
    pub fn get_for_month(
        &self,
        user_id: UserId,
        period: &MonthPeriod,
    ) -> Result<Vec<CategoryBudget>, ExpenseError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets
            .values()
            .filter(|b| b.user_id == user_id && &b.period == period)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(list)
    }

    /// Insert or replace the budget for its key
    pub fn upsert(&self, budget: CategoryBudget) -> Result<(), ExpenseError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(BudgetKey::of(&budget), budget);
        Ok(())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(budgets.len())
    }

    /// Get all budgets ordered by month, then category
    pub fn get_all(&self) -> Result<Vec<CategoryBudget>, ExpenseError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| {
            a.period
                .cmp(&b.period)
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(list)
    }
}
