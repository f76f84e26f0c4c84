//! Storage initialization
//!
//! Handles first-run setup, resetting the ledger and seeding sample data.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseError;
use crate::models::{CategoryBudget, Expense, Money, MonthPeriod, User};

use super::file_io::remove_if_exists;
use super::Storage;

/// Prepare a data directory for use
///
/// Creates the directories and a default `config.json` if none exists.
/// With `drop`, every ledger table is removed first; settings and the audit
/// log are left alone. Returns how many table files were removed.
pub fn initialize_storage(paths: &ExpensePaths, drop: bool) -> Result<usize, ExpenseError> {
    paths.ensure_directories()?;

    let mut removed = 0;
    if drop {
        for table in paths.table_files() {
            if remove_if_exists(&table)? {
                debug!(path = %table.display(), "removed table");
                removed += 1;
            }
        }
        info!(removed, "ledger reset");
    }

    if !paths.is_initialized() {
        Settings::default().save(paths)?;
    }

    Ok(removed)
}

/// Counts of the records written by `seed_sample_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSummary {
    pub users: usize,
    pub budgets: usize,
    pub expenses: usize,
}

/// Seed the demo ledger: Alice and Bob, two of Alice's October 2025 budgets
/// and one expense
///
/// Refuses to run against a ledger that already has rows.
pub fn seed_sample_data(storage: &Storage) -> Result<SampleSummary, ExpenseError> {
    if !storage.is_empty()? {
        return Err(ExpenseError::Validation(
            "Sample data can only be loaded into an empty ledger (use --drop)".into(),
        ));
    }

    let alice = User::new("Alice", Some("alice@example.com".into()));
    let bob = User::new("Bob", Some("bob@example.com".into()));

    let october = MonthPeriod::new(2025, 10)
        .map_err(|e| ExpenseError::Validation(e.to_string()))?;
    let budgets = [
        CategoryBudget::new(alice.id, "Food", october, Money::from_units(300, 0), Some(10)),
        CategoryBudget::new(alice.id, "Transport", october, Money::from_units(120, 0), Some(15)),
    ];

    let lunch_date = NaiveDate::from_ymd_opt(2025, 10, 5)
        .ok_or_else(|| ExpenseError::Validation("Invalid sample date".into()))?;
    let lunch = Expense::new(alice.id, lunch_date, Money::from_units(45, 0), "Food").with_note("Lunch");

    for user in [&alice, &bob] {
        storage.users.upsert(user.clone())?;
        storage.log_create(EntityType::User, user.id.to_string(), Some(user.name.clone()), user)?;
    }
    for budget in &budgets {
        storage.budgets.upsert(budget.clone())?;
        storage.log_create(
            EntityType::CategoryBudget,
            budget.id.to_string(),
            Some(format!("{} {}", budget.category, budget.period)),
            budget,
        )?;
    }
    storage.expenses.insert(lunch.clone())?;
    storage.log_create(EntityType::Expense, lunch.id.to_string(), None, &lunch)?;

    storage.save_all()?;

    Ok(SampleSummary {
        users: 2,
        budgets: budgets.len(),
        expenses: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(paths: &ExpensePaths) -> Storage {
        let mut storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        storage
    }

    #[test]
    fn test_initialize_creates_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().join("tracker"));

        assert!(!paths.is_initialized());
        assert_eq!(initialize_storage(&paths, false).unwrap(), 0);

        assert!(paths.is_initialized());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_initialize_keeps_existing_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            default_alert_percent: 25,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        initialize_storage(&paths, true).unwrap();

        let contents = std::fs::read_to_string(paths.settings_file()).unwrap();
        let loaded: Settings = serde_json::from_str(&contents).unwrap();
        assert_eq!(loaded.default_alert_percent, 25);
    }

    #[test]
    fn test_drop_removes_tables() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, false).unwrap();
        seed_sample_data(&open(&paths)).unwrap();

        assert_eq!(initialize_storage(&paths, true).unwrap(), 4);
        assert!(open(&paths).is_empty().unwrap());
    }

    #[test]
    fn test_seed_sample_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = open(&paths);

        let summary = seed_sample_data(&storage).unwrap();
        assert_eq!(
            summary,
            SampleSummary {
                users: 2,
                budgets: 2,
                expenses: 1
            }
        );

        let reloaded = open(&paths);
        let alice = reloaded.users.get_by_name("Alice").unwrap().unwrap();
        assert_eq!(alice.email.as_deref(), Some("alice@example.com"));
        assert!(reloaded.users.name_exists("Bob").unwrap());

        let october = MonthPeriod::new(2025, 10).unwrap();
        let transport = reloaded.budgets.get(alice.id, "Transport", &october).unwrap().unwrap();
        assert_eq!(transport.amount, Money::from_units(120, 0));
        assert_eq!(transport.alert_percent, Some(15));

        let expenses = reloaded.expenses.get_for_month(alice.id, &october).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].note, "Lunch");

        assert_eq!(reloaded.audit().read_all().unwrap().len(), 5);
    }

    #[test]
    fn test_seed_refuses_non_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = open(&paths);
        storage.users.upsert(User::new("Carol", None)).unwrap();

        let err = seed_sample_data(&storage).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.users.count().unwrap(), 1);
    }
}
