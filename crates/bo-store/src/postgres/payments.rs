//! Payment repository

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{Payment, PaymentMethod};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::PaymentStore;

#[derive(Debug, Clone, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    invoice_id: Uuid,
    payment_date: NaiveDate,
    amount: f64,
    method: String,
    reference: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = StoreError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let method = PaymentMethod::parse(&row.method)
            .map_err(|e| StoreError::CorruptRow(format!("payment {}: {e}", row.id)))?;
        Ok(Payment {
            id: Some(row.id),
            invoice_id: row.invoice_id,
            payment_date: row.payment_date,
            amount: row.amount,
            method,
            reference: row.reference,
            created_at: Some(row.created_at),
        })
    }
}

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn get(&self, id: Id) -> StoreResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, invoice_id, payment_date, amount, method, reference, created_at
             FROM payments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Payment::try_from).transpose()
    }

    async fn list(&self) -> StoreResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, invoice_id, payment_date, amount, method, reference, created_at
             FROM payments",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn create(&self, mut record: Payment) -> StoreResult<Payment> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        sqlx::query(
            "INSERT INTO payments (id, invoice_id, payment_date, amount, method, reference, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.id.unwrap())
        .bind(record.invoice_id)
        .bind(record.payment_date)
        .bind(record.amount)
        .bind(record.method.as_str())
        .bind(&record.reference)
        .bind(record.created_at.unwrap())
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_invoice(&self, invoice_id: Id) -> StoreResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, invoice_id, payment_date, amount, method, reference, created_at
             FROM payments WHERE invoice_id = $1",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Payment::try_from).collect()
    }
}
