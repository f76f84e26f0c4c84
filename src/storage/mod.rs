//! Ledger storage
//!
//! One JSON table per record kind under the data directory, each rewritten
//! atomically on commit. Repositories hold the tables in memory between
//! `load_all` and `save`.

pub mod budgets;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod shares;
pub mod users;

pub use budgets::{BudgetKey, BudgetRepository};
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, remove_if_exists, write_json_atomic};
pub use init::{initialize_storage, seed_sample_data};
pub use shares::ShareRepository;
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::ExpensePaths;
use crate::error::ExpenseError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ExpensePaths,
    pub users: UserRepository,
    pub expenses: ExpenseRepository,
    pub shares: ShareRepository,
    pub budgets: BudgetRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            shares: ShareRepository::new(paths.shares_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all tables from disk
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.users.load()?;
        self.expenses.load()?;
        self.shares.load()?;
        self.budgets.load()?;
        Ok(())
    }

    /// Save all tables to disk
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.users.save()?;
        self.expenses.save()?;
        self.shares.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// True when no table holds any rows
    pub fn is_empty(&self) -> Result<bool, ExpenseError> {
        Ok(self.users.count()? == 0
            && self.expenses.count()? == 0
            && self.shares.count()? == 0
            && self.budgets.count()? == 0)
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log, summarizing the changed fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), ExpenseError> {
        let summary = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            summary,
        ))
    }

    /// Record several creates of one kind with a single append
    pub fn log_create_all<'a, T, I>(&self, entity_type: EntityType, entities: I) -> Result<(), ExpenseError>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = (String, &'a T)>,
    {
        let entries: Vec<_> = entities
            .into_iter()
            .map(|(id, entity)| AuditEntry::create(entity_type, id, None, entity))
            .collect();
        self.audit.log_batch(&entries)
    }
}
