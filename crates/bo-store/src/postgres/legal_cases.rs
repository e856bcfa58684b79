//! Legal case repository
//!
//! Hearings cascade on case deletion through the foreign key
//! (`ON DELETE CASCADE`), so no explicit child cleanup happens here.

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{LegalCase, LegalCasePatch};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::EntityStore;

#[derive(Debug, Clone, sqlx::FromRow)]
struct LegalCaseRow {
    id: Uuid,
    case_number: String,
    court_name: String,
    location: String,
    parties: String,
    summary: String,
    created_at: DateTime<Utc>,
}

impl From<LegalCaseRow> for LegalCase {
    fn from(row: LegalCaseRow) -> Self {
        LegalCase {
            id: Some(row.id),
            case_number: row.case_number,
            court_name: row.court_name,
            location: row.location,
            parties: row.parties,
            summary: row.summary,
            created_at: Some(row.created_at),
        }
    }
}

pub struct LegalCaseRepository {
    pool: PgPool,
}

impl LegalCaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore<LegalCase, LegalCasePatch> for LegalCaseRepository {
    async fn get(&self, id: Id) -> StoreResult<Option<LegalCase>> {
        let row = sqlx::query_as::<_, LegalCaseRow>(
            "SELECT id, case_number, court_name, location, parties, summary, created_at
             FROM legal_cases WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(LegalCase::from))
    }

    async fn list(&self) -> StoreResult<Vec<LegalCase>> {
        let rows = sqlx::query_as::<_, LegalCaseRow>(
            "SELECT id, case_number, court_name, location, parties, summary, created_at
             FROM legal_cases",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(LegalCase::from).collect())
    }

    async fn create(&self, mut record: LegalCase) -> StoreResult<LegalCase> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        sqlx::query(
            "INSERT INTO legal_cases (id, case_number, court_name, location, parties, summary, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.id.unwrap())
        .bind(&record.case_number)
        .bind(&record.court_name)
        .bind(&record.location)
        .bind(&record.parties)
        .bind(&record.summary)
        .bind(record.created_at.unwrap())
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update(&self, id: Id, patch: LegalCasePatch) -> StoreResult<Option<LegalCase>> {
        let Some(mut case) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply_to(&mut case);
        sqlx::query(
            "UPDATE legal_cases SET case_number = $2, court_name = $3, location = $4, parties = $5, summary = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(&case.case_number)
        .bind(&case.court_name)
        .bind(&case.location)
        .bind(&case.parties)
        .bind(&case.summary)
        .execute(&self.pool)
        .await?;
        Ok(Some(case))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM legal_cases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM legal_cases")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
