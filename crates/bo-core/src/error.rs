//! Core error types for Backoffice RS
//!
//! Validation failures are collected per field before any store call is made;
//! everything past the validation gate maps onto the coarser `CoreError` variants.

use std::collections::HashMap;
use thiserror::Error;

/// Core error type for all backoffice operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Document storage error: {0}")]
    Storage(String),

    #[error("Mail delivery error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "not_found",
            CoreError::Validation(_) => "validation_failed",
            CoreError::Conflict { .. } => "conflict",
            CoreError::Database(_) => "database_error",
            CoreError::Storage(_) => "storage_error",
            CoreError::Mail(_) => "mail_error",
            CoreError::Config(_) => "configuration_error",
            CoreError::Internal(_) => "internal_error",
        }
    }
}

/// Validation errors collection, keyed by field name
#[derive(Error, Debug, Default, Clone)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    /// Human-readable messages, one per error
    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "can't be blank");
        errors.add("title", "is too short");
        errors.add_base("record is stale");

        assert!(!errors.is_empty());
        assert!(errors.has_error("title"));
        assert_eq!(errors.get("title").unwrap().len(), 2);
        assert_eq!(errors.full_messages().len(), 3);
    }

    #[test]
    fn test_merge_combines_both_maps() {
        let mut a = ValidationErrors::new();
        a.add("email", "is invalid");
        let mut b = ValidationErrors::new();
        b.add("email", "is taken");
        b.add_base("boom");

        a.merge(b);
        assert_eq!(a.get("email").unwrap().len(), 2);
        assert_eq!(a.base_errors.len(), 1);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CoreError::not_found("Task", "abc").error_code(),
            "not_found"
        );
        assert_eq!(CoreError::conflict("linked tasks").error_code(), "conflict");
    }
}
