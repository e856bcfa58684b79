//! # bo-notifications
//!
//! Outbound email for Backoffice RS. The core contract is a single
//! fire-and-forget `send(to, subject, html_body)`; there is no retry, no
//! backoff, and delivery failures are surfaced to the caller.

pub mod email;
pub mod mailer;
pub mod messages;

pub use email::EmailMessage;
pub use mailer::{LogMailer, MailError, MailResult, Mailer};
