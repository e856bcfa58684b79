//! Postgres backend
//!
//! One repository per table, each implementing the same store traits as the
//! in-memory backend. Multi-step writes are NOT wrapped in transactions; the
//! service layer treats partial completion as an observable state.

use std::time::Duration;

use bo_core::config::DatabaseSettings;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::error::StoreResult;

pub mod customers;
pub mod employees;
pub mod hearings;
pub mod invoices;
pub mod legal_cases;
pub mod payments;
pub mod tasks;

pub use customers::CustomerRepository;
pub use employees::EmployeeRepository;
pub use hearings::HearingRepository;
pub use invoices::InvoiceRepository;
pub use legal_cases::LegalCaseRepository;
pub use payments::PaymentRepository;
pub use tasks::TaskRepository;

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect using the given settings.
    pub async fn connect(settings: &DatabaseSettings) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .connect(&settings.url)
            .await?;
        info!(max_connections = settings.max_connections, "connected to database");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
