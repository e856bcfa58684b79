//! Customer repository

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{Customer, CustomerPatch};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::EntityStore;

#[derive(Debug, Clone, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    company_name: String,
    contact_person: String,
    email: String,
    phone_number: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: Some(row.id),
            company_name: row.company_name,
            contact_person: row.contact_person,
            email: row.email,
            phone_number: row.phone_number,
            created_at: Some(row.created_at),
        }
    }
}

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Customer, CustomerPatch> for CustomerRepository {
    async fn get(&self, id: Id) -> StoreResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, company_name, contact_person, email, phone_number, created_at
             FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Customer::from))
    }

    async fn list(&self) -> StoreResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, company_name, contact_person, email, phone_number, created_at
             FROM customers",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn create(&self, mut record: Customer) -> StoreResult<Customer> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        sqlx::query(
            "INSERT INTO customers (id, company_name, contact_person, email, phone_number, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id.unwrap())
        .bind(&record.company_name)
        .bind(&record.contact_person)
        .bind(&record.email)
        .bind(&record.phone_number)
        .bind(record.created_at.unwrap())
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update(&self, id: Id, patch: CustomerPatch) -> StoreResult<Option<Customer>> {
        let Some(mut customer) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut customer);
        sqlx::query(
            "UPDATE customers SET company_name = $2, contact_person = $3, email = $4, phone_number = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(&customer.company_name)
        .bind(&customer.contact_person)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .execute(&self.pool)
        .await?;
        Ok(Some(customer))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
