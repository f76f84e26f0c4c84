//! User service
//!
//! Creates users and resolves the names commands refer to them by.

use tracing::debug;

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new user
    ///
    /// Names are unique and compared exactly; a blank email is ignored.
    pub fn create(&self, name: &str, email: Option<&str>) -> ExpenseResult<User> {
        let user = User::new(name, email.map(str::to_string));

        user.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if self.storage.users.name_exists(&user.name)? {
            return Err(ExpenseError::user_exists(&user.name));
        }

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            Some(user.name.clone()),
            &user,
        )?;

        debug!(user = %user.name, id = %user.id, "user created");
        Ok(user)
    }

    /// Find a user by exact name, or by ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<User>> {
        if let Some(user) = self.storage.users.get_by_name(identifier.trim())? {
            return Ok(Some(user));
        }

        if let Ok(id) = identifier.parse::<UserId>() {
            return self.storage.users.get(id);
        }

        Ok(None)
    }

    /// Find a user or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> ExpenseResult<User> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::user_not_found(identifier))
    }

    /// List all users
    pub fn list(&self) -> ExpenseResult<Vec<User>> {
        self.storage.users.get_all()
    }
}
