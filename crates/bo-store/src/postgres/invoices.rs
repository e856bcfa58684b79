//! Invoice repository

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{Invoice, InvoicePatch};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::EntityStore;

#[derive(Debug, Clone, sqlx::FromRow)]
struct InvoiceRow {
    id: Uuid,
    invoice_number: String,
    invoice_date: NaiveDate,
    customer_id: Uuid,
    total_amount: f64,
    paid_amount: f64,
    created_at: DateTime<Utc>,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Invoice {
            id: Some(row.id),
            invoice_number: row.invoice_number,
            invoice_date: row.invoice_date,
            customer_id: row.customer_id,
            total_amount: row.total_amount,
            paid_amount: row.paid_amount,
            created_at: Some(row.created_at),
        }
    }
}

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Invoice, InvoicePatch> for InvoiceRepository {
    async fn get(&self, id: Id) -> StoreResult<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            "SELECT id, invoice_number, invoice_date, customer_id, total_amount, paid_amount, created_at
             FROM invoices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Invoice::from))
    }

    async fn list(&self) -> StoreResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            "SELECT id, invoice_number, invoice_date, customer_id, total_amount, paid_amount, created_at
             FROM invoices",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Invoice::from).collect())
    }

    async fn create(&self, mut record: Invoice) -> StoreResult<Invoice> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        sqlx::query(
            "INSERT INTO invoices (id, invoice_number, invoice_date, customer_id, total_amount, paid_amount, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.id.unwrap())
        .bind(&record.invoice_number)
        .bind(record.invoice_date)
        .bind(record.customer_id)
        .bind(record.total_amount)
        .bind(record.paid_amount)
        .bind(record.created_at.unwrap())
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update(&self, id: Id, patch: InvoicePatch) -> StoreResult<Option<Invoice>> {
        let Some(mut invoice) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut invoice);
        sqlx::query(
            "UPDATE invoices SET invoice_number = $2, invoice_date = $3, total_amount = $4, paid_amount = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(&invoice.invoice_number)
        .bind(invoice.invoice_date)
        .bind(invoice.total_amount)
        .bind(invoice.paid_amount)
        .execute(&self.pool)
        .await?;
        Ok(Some(invoice))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
