//! Mailer contract and test implementations

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::email::EmailMessage;

/// Mail errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid recipient: {0:?}")]
    InvalidRecipient(String),
    #[error("send failed: {0}")]
    SendFailed(String),
}

pub type MailResult<T> = Result<T, MailError>;

impl From<MailError> for bo_core::CoreError {
    fn from(err: MailError) -> Self {
        bo_core::CoreError::Mail(err.to_string())
    }
}

/// Outbound mail contract: `send(to, subject, html_body)`.
///
/// Callers must pass a non-empty, address-shaped recipient; implementations
/// re-check via [`validate_recipient`] before dispatching.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> MailResult<()>;
}

/// Reject empty or obviously malformed recipient addresses before any
/// provider call is made.
pub fn validate_recipient(to: &str) -> MailResult<()> {
    let trimmed = to.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(MailError::InvalidRecipient(to.to_string()));
    }
    Ok(())
}

/// Mailer that records messages instead of delivering them.
///
/// The delivery sink for tests; also usable as a no-op sink in environments
/// without an email provider configured.
#[derive(Default)]
pub struct LogMailer {
    sent: RwLock<Vec<EmailMessage>>,
}

impl LogMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> MailResult<()> {
        validate_recipient(to)?;
        let message = EmailMessage::new(to, subject, html_body);
        info!(to, subject, id = %message.id, "recorded outbound email");
        self.sent.write().await.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_error_maps_onto_core_taxonomy() {
        let err: bo_core::CoreError =
            MailError::SendFailed("provider down".into()).into();
        assert!(matches!(err, bo_core::CoreError::Mail(_)));
        assert_eq!(err.error_code(), "mail_error");
    }

    #[test]
    fn test_recipient_validation() {
        assert!(validate_recipient("jane@example.com").is_ok());
        assert!(matches!(
            validate_recipient(""),
            Err(MailError::InvalidRecipient(_))
        ));
        assert!(matches!(
            validate_recipient("   "),
            Err(MailError::InvalidRecipient(_))
        ));
        assert!(matches!(
            validate_recipient("not-an-address"),
            Err(MailError::InvalidRecipient(_))
        ));
    }

    #[tokio::test]
    async fn test_log_mailer_records_messages() {
        let mailer = LogMailer::new();
        mailer
            .send("jane@example.com", "Task assigned", "<p>hi</p>")
            .await
            .unwrap();

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "jane@example.com");
    }

    #[tokio::test]
    async fn test_log_mailer_rejects_empty_recipient() {
        let mailer = LogMailer::new();
        let result = mailer.send("", "Subject", "<p>body</p>").await;
        assert!(result.is_err());
        assert!(mailer.sent().await.is_empty());
    }
}
