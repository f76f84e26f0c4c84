//! Alert delivery
//!
//! Delivery is best-effort: a failed send is logged and reported as `false`,
//! never as an error, so an unreachable mail server cannot fail a command.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info, warn};

use crate::config::EmailSettings;
use crate::error::{ExpenseError, ExpenseResult};

/// Something that can deliver an alert to an address
pub trait Notifier {
    /// Deliver `body` to `to`; returns whether delivery succeeded
    fn send(&self, to: &str, subject: &str, body: &str) -> bool;
}

/// Sends alerts as plain-text email over SMTP
pub struct EmailNotifier {
    settings: EmailSettings,
}

impl EmailNotifier {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    fn build_message(&self, to: &str, subject: &str, body: &str) -> ExpenseResult<Message> {
        let from: Mailbox = self.settings.from_email.trim().parse().map_err(|e| {
            ExpenseError::Notification(format!(
                "Invalid sender address '{}': {}",
                self.settings.from_email, e
            ))
        })?;
        let to: Mailbox = to.trim().parse().map_err(|e| {
            ExpenseError::Notification(format!("Invalid recipient address '{}': {}", to, e))
        })?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| ExpenseError::Notification(format!("Failed to build email: {}", e)))
    }

    fn transport(&self) -> SmtpTransport {
        // Plain SMTP; the server decides whether to offer STARTTLS
        let mut builder = SmtpTransport::builder_dangerous(self.settings.smtp_host.trim())
            .port(self.settings.effective_port());

        if self.settings.has_credentials() {
            builder = builder.credentials(Credentials::new(
                self.settings.smtp_user.clone(),
                self.settings.smtp_pass.clone(),
            ));
        }

        builder.build()
    }

    fn deliver(&self, to: &str, subject: &str, body: &str) -> ExpenseResult<()> {
        let email = self.build_message(to, subject, body)?;
        self.transport()
            .send(&email)
            .map_err(|e| ExpenseError::Notification(format!("Failed to send email: {}", e)))?;
        Ok(())
    }
}

impl Notifier for EmailNotifier {
    fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        if !self.settings.is_configured() {
            debug!("email not configured, skipping notification");
            return false;
        }

        match self.deliver(to, subject, body) {
            Ok(()) => {
                info!(to, subject, "alert email sent");
                true
            }
            Err(e) => {
                warn!(to, error = %e, "alert email not sent");
                false
            }
        }
    }
}

/// A message captured by `RecordingNotifier`
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Notifier that remembers what it was asked to send
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: std::cell::RefCell<Vec<SentMessage>>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        self.sent.borrow_mut().push(SentMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        true
    }
}
