//! Configuration types and environment loading

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Database configuration
    pub database: DatabaseSettings,

    /// Document storage configuration
    pub storage: StorageSettings,

    /// Outbound mail configuration
    pub mail: MailSettings,

    /// Toggleable validation rules
    pub validation: ValidationRules,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/backoffice".to_string(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Root directory for the local document store
    pub root: String,
    /// Base URL prefix for public document links
    pub base_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root: "./documents".to_string(),
            base_url: "/documents".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailSettings {
    pub from_address: String,
    pub from_name: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            from_address: "noreply@backoffice.local".to_string(),
            from_name: "Backoffice".to_string(),
        }
    }
}

/// Validation rules that are policy decisions rather than hard invariants.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
pub struct ValidationRules {
    /// Reject task writes where paid_amount would exceed billing_amount.
    /// Off by default: overpayment may be a legitimate credit-note scenario.
    pub forbid_overpayment: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            storage: StorageSettings::default(),
            mail: MailSettings::default(),
            validation: ValidationRules::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Reads `.env` first so local development picks up the same variables as
    /// a deployed process.
    pub fn load() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(v) = std::env::var("DB_MAX_CONNECTIONS") {
            config.database.max_connections = v
                .parse()
                .map_err(|_| CoreError::Config(format!("invalid DB_MAX_CONNECTIONS: {v}")))?;
        }
        if let Ok(v) = std::env::var("DB_CONNECT_TIMEOUT") {
            config.database.connect_timeout_secs = v
                .parse()
                .map_err(|_| CoreError::Config(format!("invalid DB_CONNECT_TIMEOUT: {v}")))?;
        }
        if let Ok(root) = std::env::var("DOCUMENT_STORAGE_ROOT") {
            config.storage.root = root;
        }
        if let Ok(base) = std::env::var("DOCUMENT_BASE_URL") {
            config.storage.base_url = base;
        }
        if let Ok(from) = std::env::var("MAIL_FROM_ADDRESS") {
            config.mail.from_address = from;
        }
        if let Ok(name) = std::env::var("MAIL_FROM_NAME") {
            config.mail.from_name = name;
        }
        if let Ok(v) = std::env::var("FORBID_OVERPAYMENT") {
            config.validation.forbid_overpayment = matches!(v.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}
