//! User settings for the expense tracker
//!
//! Settings are persisted as `config.json`. Environment variables take
//! precedence over the file for the notification transport and the default
//! alert threshold.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Default SMTP port used when none is configured
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// SMTP settings for budget alert emails
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    /// SMTP server host; notifications are disabled while empty
    #[serde(default)]
    pub smtp_host: String,

    /// SMTP server port (0 means the protocol default)
    #[serde(default)]
    pub smtp_port: u16,

    /// Login user; no authentication is attempted while empty
    #[serde(default)]
    pub smtp_user: String,

    #[serde(default)]
    pub smtp_pass: String,

    /// Sender address; notifications are disabled while empty
    #[serde(default)]
    pub from_email: String,
}

impl EmailSettings {
    /// Whether enough is configured to attempt delivery
    pub fn is_configured(&self) -> bool {
        !self.smtp_host.trim().is_empty() && !self.from_email.trim().is_empty()
    }

    /// The port to connect to, falling back to the SMTP default
    pub fn effective_port(&self) -> u16 {
        if self.smtp_port == 0 {
            DEFAULT_SMTP_PORT
        } else {
            self.smtp_port
        }
    }

    /// Whether SMTP authentication should be attempted
    pub fn has_credentials(&self) -> bool {
        !self.smtp_user.is_empty()
    }
}

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Percent of a budget below which remaining funds trigger a notice,
    /// used when a budget has no custom alert percent
    #[serde(default = "default_alert_percent")]
    pub default_alert_percent: u32,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Email notification transport
    #[serde(default)]
    pub email: EmailSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_alert_percent() -> u32 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_alert_percent: default_alert_percent(),
            log_level: default_log_level(),
            email: EmailSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk (or defaults if the file doesn't exist), then
    /// apply environment overrides
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let mut settings = Self::load_file(paths)?;
        settings.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    fn load_file(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpenseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Apply `SMTP_*`, `FROM_EMAIL` and `LOW_BUDGET_PERCENT` overrides
    ///
    /// The lookup is injected so tests don't have to mutate the process
    /// environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ExpenseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SMTP_HOST") {
            self.email.smtp_host = host;
        }
        if let Some(port) = lookup("SMTP_PORT").filter(|p| !p.trim().is_empty()) {
            self.email.smtp_port = port.trim().parse().map_err(|_| {
                ExpenseError::Config(format!("SMTP_PORT must be a port number, got '{}'", port))
            })?;
        }
        if let Some(user) = lookup("SMTP_USER") {
            self.email.smtp_user = user;
        }
        if let Some(pass) = lookup("SMTP_PASS") {
            self.email.smtp_pass = pass;
        }
        if let Some(from) = lookup("FROM_EMAIL") {
            self.email.from_email = from;
        }
        if let Some(pct) = lookup("LOW_BUDGET_PERCENT").filter(|p| !p.trim().is_empty()) {
            self.default_alert_percent = pct.trim().parse().map_err(|_| {
                ExpenseError::Config(format!(
                    "LOW_BUDGET_PERCENT must be a non-negative integer, got '{}'",
                    pct
                ))
            })?;
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_alert_percent, 10);
        assert_eq!(settings.log_level, "warn");
        assert!(!settings.email.is_configured());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_alert_percent = 25;
        settings.email.smtp_host = "mail.example.com".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_file(&paths).unwrap();
        assert_eq!(loaded.default_alert_percent, 25);
        assert_eq!(loaded.email.smtp_host, "mail.example.com");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.default_alert_percent, 10);
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.email, EmailSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_env_overrides(env_from(&[
                ("SMTP_HOST", "smtp.example.com"),
                ("SMTP_PORT", "2525"),
                ("SMTP_USER", "bot"),
                ("SMTP_PASS", "secret"),
                ("FROM_EMAIL", "alerts@example.com"),
                ("LOW_BUDGET_PERCENT", "15"),
            ]))
            .unwrap();

        assert!(settings.email.is_configured());
        assert!(settings.email.has_credentials());
        assert_eq!(settings.email.effective_port(), 2525);
        assert_eq!(settings.default_alert_percent, 15);
    }

    #[test]
    fn test_empty_numeric_overrides_are_ignored() {
        let mut settings = Settings::default();
        settings
            .apply_env_overrides(env_from(&[("SMTP_PORT", ""), ("LOW_BUDGET_PERCENT", " ")]))
            .unwrap();
        assert_eq!(settings.email.effective_port(), DEFAULT_SMTP_PORT);
        assert_eq!(settings.default_alert_percent, 10);
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let mut settings = Settings::default();
        let err = settings
            .apply_env_overrides(env_from(&[("LOW_BUDGET_PERCENT", "-5")]))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_host_without_sender_is_not_configured() {
        let email = EmailSettings {
            smtp_host: "smtp.example.com".into(),
            ..EmailSettings::default()
        };
        assert!(!email.is_configured());
    }
}
