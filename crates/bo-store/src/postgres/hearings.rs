//! Hearing repository

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{Hearing, HearingPatch};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::{EntityStore, HearingQueries};

#[derive(Debug, Clone, sqlx::FromRow)]
struct HearingRow {
    id: Uuid,
    case_id: Uuid,
    hearing_date: NaiveDate,
    pdf_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<HearingRow> for Hearing {
    fn from(row: HearingRow) -> Self {
        Hearing {
            id: Some(row.id),
            case_id: row.case_id,
            hearing_date: row.hearing_date,
            pdf_path: row.pdf_path,
            created_at: Some(row.created_at),
        }
    }
}

pub struct HearingRepository {
    pool: PgPool,
}

impl HearingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<Hearing, HearingPatch> for HearingRepository {
    async fn get(&self, id: Id) -> StoreResult<Option<Hearing>> {
        let row = sqlx::query_as::<_, HearingRow>(
            "SELECT id, case_id, hearing_date, pdf_path, created_at
             FROM legal_hearings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Hearing::from))
    }

    async fn list(&self) -> StoreResult<Vec<Hearing>> {
        let rows = sqlx::query_as::<_, HearingRow>(
            "SELECT id, case_id, hearing_date, pdf_path, created_at FROM legal_hearings",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Hearing::from).collect())
    }

    async fn create(&self, mut record: Hearing) -> StoreResult<Hearing> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        sqlx::query(
            "INSERT INTO legal_hearings (id, case_id, hearing_date, pdf_path, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(record.id.unwrap())
        .bind(record.case_id)
        .bind(record.hearing_date)
        .bind(&record.pdf_path)
        .bind(record.created_at.unwrap())
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update(&self, id: Id, patch: HearingPatch) -> StoreResult<Option<Hearing>> {
        let Some(mut hearing) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut hearing);
        sqlx::query("UPDATE legal_hearings SET hearing_date = $2, pdf_path = $3 WHERE id = $1")
            .bind(id)
            .bind(hearing.hearing_date)
            .bind(&hearing.pdf_path)
            .execute(&self.pool)
            .await?;
        Ok(Some(hearing))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM legal_hearings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM legal_hearings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}

#[async_trait]
impl HearingQueries for HearingRepository {
    async fn find_by_case(&self, case_id: Id) -> StoreResult<Vec<Hearing>> {
        let rows = sqlx::query_as::<_, HearingRow>(
            "SELECT id, case_id, hearing_date, pdf_path, created_at
             FROM legal_hearings WHERE case_id = $1",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Hearing::from).collect())
    }
}
