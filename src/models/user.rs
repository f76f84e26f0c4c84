//! User model
//!
//! A user owns expenses and category budgets. Names are unique and are the
//! handle every command uses to refer to a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// A person whose spending is tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Unique display name
    pub name: String,

    /// Contact address for budget alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user; blank email addresses are treated as absent
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into().trim().to_string(),
            email: email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            created_at: Utc::now(),
        }
    }

    /// Address alerts should be sent to, if any
    pub fn alert_address(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if self.name.contains(',') || self.name.contains(':') {
            return Err(UserValidationError::ReservedCharacter(self.name.clone()));
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(UserValidationError::InvalidEmail(email.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    /// `,` and `:` would make the name unusable in a shares list
    ReservedCharacter(String),
    InvalidEmail(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "User name cannot be empty"),
            Self::ReservedCharacter(name) => {
                write!(f, "User name '{}' cannot contain ',' or ':'", name)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{}'", email),
        }
    }
}

impl std::error::Error for UserValidationError {}
