//! Expense share repository for JSON storage
//!
//! Manages loading and saving expense shares to expense_shares.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{ExpenseId, ExpenseShare, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable share table
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ShareData {
    shares: Vec<ExpenseShare>,
}

/// Repository for expense share persistence
///
/// Shares are append-only and kept in insertion order.
pub struct ShareRepository {
    path: PathBuf,
    data: RwLock<Vec<ExpenseShare>>,
}

impl ShareRepository {
    /// Create a new share repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load shares from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: ShareData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.shares;
        Ok(())
    }

    /// Save shares to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = ShareData {
            shares: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Append shares
    pub fn insert_all(&self, shares: &[ExpenseShare]) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.extend_from_slice(shares);
        Ok(())
    }

    /// Get the shares recorded for one expense
    pub fn get_by_expense(&self, expense_id: ExpenseId) -> Result<Vec<ExpenseShare>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .iter()
            .filter(|s| s.expense_id == expense_id)
            .cloned()
            .collect())
    }

    /// Get the shares attributed to a user
    pub fn get_by_user(&self, user_id: UserId) -> Result<Vec<ExpenseShare>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    /// Count shares
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}
