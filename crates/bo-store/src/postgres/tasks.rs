//! Task repository
//!
//! The status side effects (overdue override, completed_at stamping) are
//! applied in Rust before the row is written, through the same
//! `Task::apply_status_rules` the in-memory backend uses.

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{Priority, Task, TaskPatch, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::{EntityStore, TaskQueries};

#[derive(Debug, Clone, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    due_date: NaiveDate,
    priority: String,
    status: String,
    employee_id: Option<Uuid>,
    customer_id: Option<Uuid>,
    billing_amount: Option<f64>,
    paid_amount: f64,
    invoice_id: Option<Uuid>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let priority = Priority::parse(&row.priority)
            .map_err(|e| StoreError::CorruptRow(format!("task {}: {e}", row.id)))?;
        let status = TaskStatus::parse(&row.status)
            .map_err(|e| StoreError::CorruptRow(format!("task {}: {e}", row.id)))?;
        Ok(Task {
            id: Some(row.id),
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            priority,
            status,
            employee_id: row.employee_id,
            customer_id: row.customer_id,
            billing_amount: row.billing_amount,
            paid_amount: row.paid_amount,
            invoice_id: row.invoice_id,
            completed_at: row.completed_at,
            created_at: Some(row.created_at),
        })
    }
}

const TASK_COLUMNS: &str = "id, title, description, due_date, priority, status, employee_id, \
     customer_id, billing_amount, paid_amount, invoice_id, completed_at, created_at";

pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(&self, clause: &str, bind: Uuid) -> StoreResult<Vec<Task>> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE {clause}");
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .bind(bind)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Task::try_from).collect()
    }

    async fn write(&self, task: &Task) -> StoreResult<()> {
        sqlx::query(
            "UPDATE tasks SET title = $2, description = $3, due_date = $4, priority = $5,
                 status = $6, employee_id = $7, customer_id = $8, billing_amount = $9,
                 paid_amount = $10, invoice_id = $11, completed_at = $12
             WHERE id = $1",
        )
        .bind(task.id.unwrap())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(task.employee_id)
        .bind(task.customer_id)
        .bind(task.billing_amount)
        .bind(task.paid_amount)
        .bind(task.invoice_id)
        .bind(task.completed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl EntityStore<Task, TaskPatch> for TaskRepository {
    async fn get(&self, id: Id) -> StoreResult<Option<Task>> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let row = sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Task::try_from).transpose()
    }

    async fn list(&self) -> StoreResult<Vec<Task>> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks");
        let rows = sqlx::query_as::<_, TaskRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Task::try_from).collect()
    }

    async fn create(&self, mut record: Task) -> StoreResult<Task> {
        let now = Utc::now();
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(now);
        record.apply_status_rules(now);
        sqlx::query(
            "INSERT INTO tasks (id, title, description, due_date, priority, status, employee_id,
                 customer_id, billing_amount, paid_amount, invoice_id, completed_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(record.id.unwrap())
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.due_date)
        .bind(record.priority.as_str())
        .bind(record.status.as_str())
        .bind(record.employee_id)
        .bind(record.customer_id)
        .bind(record.billing_amount)
        .bind(record.paid_amount)
        .bind(record.invoice_id)
        .bind(record.completed_at)
        .bind(record.created_at.unwrap())
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update(&self, id: Id, patch: TaskPatch) -> StoreResult<Option<Task>> {
        let Some(mut task) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut task);
        task.apply_status_rules(Utc::now());
        self.write(&task).await?;
        Ok(Some(task))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

#[async_trait]
impl TaskQueries for TaskRepository {
    async fn find_by_employee(&self, employee_id: Id) -> StoreResult<Vec<Task>> {
        self.fetch_where("employee_id = $1", employee_id).await
    }

    async fn find_by_customer(&self, customer_id: Id) -> StoreResult<Vec<Task>> {
        self.fetch_where("customer_id = $1", customer_id).await
    }

    async fn find_unbilled(&self, customer_id: Id) -> StoreResult<Vec<Task>> {
        self.fetch_where("customer_id = $1 AND invoice_id IS NULL", customer_id)
            .await
    }

    async fn find_by_invoice(&self, invoice_id: Id) -> StoreResult<Vec<Task>> {
        self.fetch_where("invoice_id = $1", invoice_id).await
    }

    async fn clear_employee(&self, employee_id: Id) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE tasks SET employee_id = NULL WHERE employee_id = $1")
            .bind(employee_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
