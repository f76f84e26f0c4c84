//! Expense service
//!
//! Records expenses and their shares, then evaluates the affected budget.
//! The expense and its shares are committed separately: a bad split entry
//! is skipped and never undoes the expense or the other shares.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::alerts::{BudgetEvaluation, Notifier};
use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    parse_shares, Expense, ExpenseShare, Money, SkippedShare, User,
};
use crate::services::{BudgetService, UserService};
use crate::storage::Storage;

/// Input for recording an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Name (or ID) of the paying user
    pub user: String,
    pub amount: Money,
    pub category: String,
    /// Defaults to today's local date
    pub date: Option<NaiveDate>,
    pub note: String,
    pub shared: bool,
    /// Split list such as `"Bob:10,Alice:5"`; only used when `shared`
    pub shares: String,
}

impl NewExpense {
    pub fn new(user: impl Into<String>, amount: Money, category: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            amount,
            category: category.into(),
            date: None,
            note: String::new(),
            shared: false,
            shares: String::new(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn shared_with(mut self, shares: impl Into<String>) -> Self {
        self.shared = true;
        self.shares = shares.into();
        self
    }
}

/// Everything that happened while recording an expense
#[derive(Debug, Clone)]
pub struct ExpenseOutcome {
    pub user: User,
    pub expense: Expense,
    pub shares: Vec<ExpenseShare>,
    pub skipped: Vec<SkippedShare>,
    pub evaluation: BudgetEvaluation,
}

impl ExpenseOutcome {
    /// Send the budget alert to the user, if there is one and they have an
    /// address. Returns whether a message was delivered.
    pub fn notify(&self, notifier: &dyn Notifier) -> bool {
        let (Some(subject), Some(message)) = (
            self.evaluation.status.alert_subject(),
            self.evaluation.message.as_deref(),
        ) else {
            return false;
        };
        let Some(address) = self.user.alert_address() else {
            debug!(user = %self.user.name, "no email address, alert not sent");
            return false;
        };
        notifier.send(address, subject, message)
    }
}

/// Service for recording expenses
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense, its shares, and evaluate the category budget
    pub fn add(&self, input: NewExpense, default_alert_percent: u32) -> ExpenseResult<ExpenseOutcome> {
        let users = UserService::new(self.storage);
        let user = users.require(&input.user)?;

        let date = input.date.unwrap_or_else(|| Local::now().date_naive());
        let expense = Expense::new(user.id, date, input.amount, &input.category)
            .with_note(input.note)
            .shared(input.shared);

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expenses.insert(expense.clone())?;
        self.storage.expenses.save()?;
        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.to_string()),
            &expense,
        )?;
        debug!(user = %user.name, expense = %expense, "expense recorded");

        let (shares, skipped) = if expense.shared && !input.shares.trim().is_empty() {
            self.record_shares(&expense, &input.shares)?
        } else {
            (Vec::new(), Vec::new())
        };

        let evaluation = BudgetService::new(self.storage).evaluate(
            user.id,
            &expense.category,
            &expense.period(),
            default_alert_percent,
        )?;
        if let Some(message) = &evaluation.message {
            info!(user = %user.name, status = ?evaluation.status, "{}", message);
        }

        Ok(ExpenseOutcome {
            user,
            expense,
            shares,
            skipped,
            evaluation,
        })
    }

    fn record_shares(
        &self,
        expense: &Expense,
        list: &str,
    ) -> ExpenseResult<(Vec<ExpenseShare>, Vec<SkippedShare>)> {
        let parsed = parse_shares(list);
        let mut skipped = parsed.skipped;
        let mut shares = Vec::new();

        for entry in parsed.entries {
            match self.storage.users.get_by_name(&entry.name)? {
                Some(share_user) => {
                    shares.push(ExpenseShare::new(expense.id, share_user.id, entry.amount))
                }
                None => skipped.push(SkippedShare::UnknownUser(entry.name)),
            }
        }

        for skip in &skipped {
            warn!(expense = %expense.id, "skipping {}", skip);
        }

        if !shares.is_empty() {
            self.storage.shares.insert_all(&shares)?;
            self.storage.shares.save()?;
            self.storage.log_create_all(
                EntityType::ExpenseShare,
                shares.iter().map(|s| (s.id.to_string(), s)),
            )?;
        }

        Ok((shares, skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{BudgetStatus, RecordingNotifier};
    use crate::config::ExpensePaths;
    use crate::models::MonthPeriod;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn dec(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
    }

    fn setup_alice_and_bob(storage: &Storage) {
        let users = UserService::new(storage);
        users.create("Alice", Some("alice@example.com")).unwrap();
        users.create("Bob", None).unwrap();
    }

    #[test]
    fn test_add_expense_without_budget() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);

        let outcome = ExpenseService::new(&storage)
            .add(
                NewExpense::new("Alice", Money::from_units(45, 0), "Food")
                    .on(dec(5))
                    .with_note("Lunch"),
                10,
            )
            .unwrap();

        assert_eq!(outcome.evaluation.status, BudgetStatus::NoBudget);
        assert_eq!(outcome.expense.note, "Lunch");
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_add_expense_defaults_to_today() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);

        let outcome = ExpenseService::new(&storage)
            .add(NewExpense::new("Bob", Money::from_units(3, 0), "Coffee"), 10)
            .unwrap();
        assert_eq!(outcome.expense.date, Local::now().date_naive());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);
        let service = ExpenseService::new(&storage);

        for cents in [0, -300] {
            let err = service
                .add(NewExpense::new("Alice", Money::from_cents(cents), "Food"), 10)
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_amount_above_max_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);
        let service = ExpenseService::new(&storage);

        let huge = Money::parse("50000000000000000").unwrap();
        let err = service
            .add(NewExpense::new("Alice", huge, "Food").on(dec(1)), 10)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_unknown_user_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let err = ExpenseService::new(&storage)
            .add(NewExpense::new("Carol", Money::from_units(1, 0), "Food"), 10)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_shares_recorded_and_unknown_skipped() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);

        let outcome = ExpenseService::new(&storage)
            .add(
                NewExpense::new("Alice", Money::from_units(60, 0), "Food")
                    .on(dec(5))
                    .shared_with("Bob:30, Carol:10, garbage,,Bob:abc"),
                10,
            )
            .unwrap();

        assert_eq!(outcome.shares.len(), 2);
        assert_eq!(outcome.shares[0].amount, Money::from_units(30, 0));
        // Unparsable amounts are kept as zero
        assert_eq!(outcome.shares[1].amount, Money::zero());
        assert_eq!(
            outcome.skipped,
            vec![
                SkippedShare::Malformed("garbage".into()),
                SkippedShare::UnknownUser("Carol".into()),
            ]
        );
        assert_eq!(storage.shares.get_by_expense(outcome.expense.id).unwrap().len(), 2);
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_only_unknown_share_still_records_expense() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);

        let outcome = ExpenseService::new(&storage)
            .add(
                NewExpense::new("Alice", Money::from_units(10, 0), "Food").shared_with("Carol:10"),
                10,
            )
            .unwrap();

        assert!(outcome.shares.is_empty());
        assert_eq!(storage.shares.count().unwrap(), 0);
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_shares_ignored_unless_flagged_shared() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);

        let mut input = NewExpense::new("Alice", Money::from_units(10, 0), "Food");
        input.shares = "Bob:5".into();
        let outcome = ExpenseService::new(&storage).add(input, 10).unwrap();

        assert!(outcome.shares.is_empty());
        assert!(!outcome.expense.shared);
    }

    #[test]
    fn test_budget_exceeded_alert_and_notification() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);
        BudgetService::new(&storage)
            .set_budget(
                "Alice",
                "Food",
                MonthPeriod::new(2025, 12).unwrap(),
                Money::from_units(100, 0),
                None,
            )
            .unwrap();

        let service = ExpenseService::new(&storage);
        let first = service
            .add(NewExpense::new("Alice", Money::from_units(75, 0), "Food").on(dec(1)), 10)
            .unwrap();
        assert_eq!(first.evaluation.status, BudgetStatus::Ok);

        let second = service
            .add(NewExpense::new("Alice", Money::from_units(26, 0), "Food").on(dec(2)), 10)
            .unwrap();
        assert_eq!(second.evaluation.status, BudgetStatus::Exceeded);

        let notifier = RecordingNotifier::default();
        assert!(second.notify(&notifier));
        let sent = notifier.sent.borrow();
        assert_eq!(sent[0].to, "alice@example.com");
        assert_eq!(sent[0].subject, "Budget exceeded");
        assert!(sent[0].body.contains("Spent 101.00, budget 100.00"));
    }

    #[test]
    fn test_notify_skips_users_without_email() {
        let (_temp_dir, storage) = create_test_storage();
        setup_alice_and_bob(&storage);
        BudgetService::new(&storage)
            .set_budget(
                "Bob",
                "Food",
                MonthPeriod::new(2025, 12).unwrap(),
                Money::from_units(10, 0),
                None,
            )
            .unwrap();

        let outcome = ExpenseService::new(&storage)
            .add(NewExpense::new("Bob", Money::from_units(20, 0), "Food").on(dec(1)), 10)
            .unwrap();
        assert_eq!(outcome.evaluation.status, BudgetStatus::Exceeded);

        let notifier = RecordingNotifier::default();
        assert!(!outcome.notify(&notifier));
        assert!(notifier.sent.borrow().is_empty());
    }
}
