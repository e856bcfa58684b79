//! Email message type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single outbound email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Message ID
    pub id: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            to: to.into(),
            subject: subject.into(),
            html_body: html_body.into(),
            created_at: Utc::now(),
        }
    }
}
