//! Employee repository

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{Employee, EmployeePatch};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::EntityStore;

#[derive(Debug, Clone, sqlx::FromRow)]
struct EmployeeRow {
    id: Uuid,
    full_name: String,
    email: String,
    position: String,
    department: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: Some(row.id),
            full_name: row.full_name,
            email: row.email,
            position: row.position,
            department: row.department,
            created_at: Some(row.created_at),
        }
    }
}

pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Employee, EmployeePatch> for EmployeeRepository {
    async fn get(&self, id: Id) -> StoreResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, full_name, email, position, department, created_at
             FROM employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Employee::from))
    }

    async fn list(&self) -> StoreResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, full_name, email, position, department, created_at FROM employees",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn create(&self, mut record: Employee) -> StoreResult<Employee> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        sqlx::query(
            "INSERT INTO employees (id, full_name, email, position, department, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id.unwrap())
        .bind(&record.full_name)
        .bind(&record.email)
        .bind(&record.position)
        .bind(&record.department)
        .bind(record.created_at.unwrap())
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update(&self, id: Id, patch: EmployeePatch) -> StoreResult<Option<Employee>> {
        let existing = self.get(id).await?;
        let Some(mut employee) = existing else {
            return Ok(None);
        };
        patch.apply_to(&mut employee);
        sqlx::query(
            "UPDATE employees SET full_name = $2, email = $3, position = $4, department = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.position)
        .bind(&employee.department)
        .execute(&self.pool)
        .await?;
        Ok(Some(employee))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
