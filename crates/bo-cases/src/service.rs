//! Case/hearing service
//!
//! The docket partition is a pure date comparison made at read time; nothing
//! stores "past" or "upcoming" as a flag. Document attach and hearing delete
//! are each two writes against different backends, so their partial states
//! are surfaced, not rolled back.

use bo_core::{Id, ServiceResult, StepOutcome};
use bo_documents::{generate_disk_filename, DocumentStorage, StorageError};
use bo_models::{validate_record, Hearing, HearingPatch, LegalCase, LegalCasePatch};
use bo_store::{CaseStore, HearingStore};
use bytes::Bytes;
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

/// A case's hearings split around today. Today's hearings are upcoming.
#[derive(Debug, Clone)]
pub struct HearingDocket {
    pub past: Vec<Hearing>,
    pub upcoming: Vec<Hearing>,
}

impl HearingDocket {
    fn partition(hearings: Vec<Hearing>, today: NaiveDate) -> Self {
        let (upcoming, past) = hearings.into_iter().partition(|h| h.is_upcoming(today));
        Self { past, upcoming }
    }
}

pub struct CaseService<'a, C: CaseStore, H: HearingStore> {
    cases: &'a C,
    hearings: &'a H,
    storage: &'a dyn DocumentStorage,
}

impl<'a, C: CaseStore, H: HearingStore> CaseService<'a, C, H> {
    pub fn new(cases: &'a C, hearings: &'a H, storage: &'a dyn DocumentStorage) -> Self {
        Self {
            cases,
            hearings,
            storage,
        }
    }

    pub async fn create_case(&self, case: LegalCase) -> ServiceResult<LegalCase> {
        if let Err(errors) = validate_record(&case) {
            return ServiceResult::failure(errors);
        }
        match self.cases.create(case).await {
            Ok(created) => ServiceResult::success(created),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }

    pub async fn update_case(&self, id: Id, patch: LegalCasePatch) -> ServiceResult<LegalCase> {
        let existing = match self.cases.get(id).await {
            Ok(Some(case)) => case,
            Ok(None) => {
                return ServiceResult::failure_with_message(format!("Case not found: {id}"))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        let mut merged = existing.clone();
        patch.apply_to(&mut merged);
        if let Err(errors) = validate_record(&merged) {
            return ServiceResult::failure(errors);
        }

        match self.cases.update(id, patch).await {
            Ok(Some(updated)) => ServiceResult::success(updated),
            Ok(None) => ServiceResult::failure_with_message(format!("Case not found: {id}")),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }

    /// Delete a case; its hearings go with it through the store's cascade.
    #[instrument(skip(self))]
    pub async fn delete_case(&self, id: Id) -> ServiceResult<()> {
        match self.cases.delete(id).await {
            Ok(true) => ServiceResult::success(()),
            Ok(false) => ServiceResult::failure_with_message(format!("Case not found: {id}")),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }

    pub async fn add_hearing(&self, case_id: Id, date: NaiveDate) -> ServiceResult<Hearing> {
        match self.cases.get(case_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return ServiceResult::failure_with_message(format!("Case not found: {case_id}"))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        }
        match self.hearings.create(Hearing::new(case_id, date)).await {
            Ok(created) => ServiceResult::success(created),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }

    /// The case's hearings partitioned around `today`.
    pub async fn docket(&self, case_id: Id, today: NaiveDate) -> ServiceResult<HearingDocket> {
        match self.hearings.find_by_case(case_id).await {
            Ok(hearings) => ServiceResult::success(HearingDocket::partition(hearings, today)),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }

    /// Upload a document and record its path on the hearing.
    ///
    /// Upload first, record second. A metadata failure after a successful
    /// upload leaves an orphaned blob; the step trail names the stored key
    /// so the caller can clean it up.
    #[instrument(skip(self, data), fields(filename))]
    pub async fn attach_document(
        &self,
        hearing_id: Id,
        filename: &str,
        data: Bytes,
    ) -> ServiceResult<Hearing> {
        match self.hearings.get(hearing_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return ServiceResult::failure_with_message(format!(
                    "Hearing not found: {hearing_id}"
                ))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        }

        let key = format!("hearings/{}", generate_disk_filename(filename));
        let stored = match self.storage.put(&key, data).await {
            Ok(stored) => stored,
            Err(e) => {
                return ServiceResult::failure_with_message(e.to_string())
                    .with_step(StepOutcome::failed("upload document", e.to_string()));
            }
        };
        info!(key = %stored.key, size = stored.size, "hearing document uploaded");

        match self
            .hearings
            .update(hearing_id, HearingPatch::document(&stored.key))
            .await
        {
            Ok(Some(updated)) => ServiceResult::success(updated)
                .with_step(StepOutcome::ok("upload document"))
                .with_step(StepOutcome::ok("record path")),
            Ok(None) => {
                warn!(key = %stored.key, "hearing vanished after upload; blob is orphaned");
                ServiceResult::failure_with_message(format!(
                    "Document {} was uploaded but hearing {hearing_id} no longer exists",
                    stored.key
                ))
                .with_step(StepOutcome::ok("upload document"))
                .with_step(StepOutcome::failed("record path", "hearing not found"))
            }
            Err(e) => {
                warn!(key = %stored.key, error = %e, "path record failed; blob is orphaned");
                ServiceResult::failure_with_message(format!(
                    "Document {} was uploaded but not recorded on the hearing: {e}",
                    stored.key
                ))
                .with_step(StepOutcome::ok("upload document"))
                .with_step(StepOutcome::failed("record path", e.to_string()))
            }
        }
    }

    /// Delete a hearing, removing its backing document first.
    ///
    /// A storage failure aborts the record delete so no blob is silently
    /// orphaned; a blob that is already gone is tolerated and logged.
    #[instrument(skip(self))]
    pub async fn delete_hearing(&self, hearing_id: Id) -> ServiceResult<()> {
        let hearing = match self.hearings.get(hearing_id).await {
            Ok(Some(hearing)) => hearing,
            Ok(None) => {
                return ServiceResult::failure_with_message(format!(
                    "Hearing not found: {hearing_id}"
                ))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        let mut result = ServiceResult::success(());

        if let Some(key) = &hearing.pdf_path {
            match self.storage.delete(key).await {
                Ok(()) => {
                    result.record_step(StepOutcome::ok("remove document"));
                }
                Err(StorageError::NotFound(_)) => {
                    // the blob is already gone; the record can still go
                    warn!(key = %key, "hearing document already missing at delete");
                    result.record_step(StepOutcome::ok("remove document (already missing)"));
                }
                Err(e) => {
                    return ServiceResult::failure_with_message(format!(
                        "Document {key} could not be removed, hearing record kept: {e}"
                    ))
                    .with_step(StepOutcome::failed("remove document", e.to_string()));
                }
            }
        }

        match self.hearings.delete(hearing_id).await {
            Ok(true) => {
                result.record_step(StepOutcome::ok("delete hearing"));
                result
            }
            Ok(false) => {
                let mut failure = ServiceResult::failure_with_message(format!(
                    "Hearing not found: {hearing_id}"
                ));
                failure.steps = result.steps;
                failure.record_step(StepOutcome::failed("delete hearing", "record not found"));
                failure
            }
            Err(e) => {
                let mut failure = ServiceResult::failure_with_message(e.to_string());
                failure.steps = result.steps;
                failure.record_step(StepOutcome::failed("delete hearing", e.to_string()));
                failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_documents::MemoryStorage;
    use bo_store::MemoryStore;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_blank_case_number_is_rejected() {
        let store = MemoryStore::new();
        let storage = MemoryStorage::new();
        let service = CaseService::new(&store, &store, &storage);

        let result = service.create_case(LegalCase::new("", "High Court")).await;
        assert!(result.is_failure());
        assert!(result.errors.has_error("case_number"));
    }

    #[tokio::test]
    async fn test_hearing_requires_existing_case() {
        let store = MemoryStore::new();
        let storage = MemoryStorage::new();
        let service = CaseService::new(&store, &store, &storage);

        let result = service
            .add_hearing(Id::new_v4(), Utc::now().date_naive())
            .await;
        assert!(result.is_failure());
    }

    #[tokio::test]
    async fn test_docket_partitions_around_today() {
        let store = MemoryStore::new();
        let storage = MemoryStorage::new();
        let service = CaseService::new(&store, &store, &storage);
        let today = Utc::now().date_naive();

        let case = service
            .create_case(LegalCase::new("C-100", "High Court"))
            .await
            .into_value()
            .unwrap();
        let case_id = case.id.unwrap();

        let past = service
            .add_hearing(case_id, today - Duration::days(1))
            .await
            .into_value()
            .unwrap();
        let upcoming = service
            .add_hearing(case_id, today + Duration::days(1))
            .await
            .into_value()
            .unwrap();
        service
            .add_hearing(case_id, today)
            .await
            .into_value()
            .unwrap();

        let docket = service.docket(case_id, today).await.into_value().unwrap();
        assert_eq!(docket.past.len(), 1);
        assert_eq!(docket.past[0].id, past.id);
        assert_eq!(docket.upcoming.len(), 2);
        assert!(docket.upcoming.iter().any(|h| h.id == upcoming.id));
    }

    #[tokio::test]
    async fn test_attach_stores_blob_and_records_path() {
        let store = MemoryStore::new();
        let storage = MemoryStorage::new();
        let service = CaseService::new(&store, &store, &storage);
        let today = Utc::now().date_naive();

        let case = service
            .create_case(LegalCase::new("C-101", "High Court"))
            .await
            .into_value()
            .unwrap();
        let hearing = service
            .add_hearing(case.id.unwrap(), today)
            .await
            .into_value()
            .unwrap();

        let updated = service
            .attach_document(hearing.id.unwrap(), "order.pdf", Bytes::from_static(b"%PDF"))
            .await
            .into_value()
            .unwrap();

        let key = updated.pdf_path.expect("path recorded");
        assert!(key.starts_with("hearings/"));
        assert!(key.ends_with("order.pdf"));
        assert!(storage.exists(&key).await.unwrap());
    }
}
