//! Hearing model
//!
//! Table: legal_hearings
//!
//! Hearings are partitioned into past and upcoming at read time by comparing
//! the hearing date against today; the partition is never stored.

use bo_core::{Entity, Id, Identifiable, Timestamped};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Hearing entity, owned by a legal case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hearing {
    pub id: Option<Id>,

    pub case_id: Id,

    pub hearing_date: NaiveDate,

    /// Path of the attached document in the document store, if any.
    /// The backing blob must be removed before this record is deleted.
    pub pdf_path: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

impl Hearing {
    pub fn new(case_id: Id, hearing_date: NaiveDate) -> Self {
        Self {
            id: None,
            case_id,
            hearing_date,
            pdf_path: None,
            created_at: None,
        }
    }

    /// Whether this hearing is upcoming relative to the given date
    /// (today's hearings count as upcoming).
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.hearing_date >= today
    }
}

impl Identifiable for Hearing {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Hearing {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for Hearing {
    const TABLE_NAME: &'static str = "legal_hearings";
    const TYPE_NAME: &'static str = "Hearing";
}

/// Partial update for a hearing; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HearingPatch {
    pub hearing_date: Option<NaiveDate>,
    pub pdf_path: Option<Option<String>>,
}

impl HearingPatch {
    pub fn apply_to(&self, hearing: &mut Hearing) {
        if let Some(hearing_date) = self.hearing_date {
            hearing.hearing_date = hearing_date;
        }
        if let Some(pdf_path) = &self.pdf_path {
            hearing.pdf_path = pdf_path.clone();
        }
    }

    pub fn document(path: impl Into<String>) -> Self {
        Self {
            pdf_path: Some(Some(path.into())),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_boundary_is_inclusive_of_today() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let case_id = Id::new_v4();

        let today_hearing = Hearing::new(case_id, today);
        let yesterday = Hearing::new(case_id, today.pred_opt().unwrap());
        let tomorrow = Hearing::new(case_id, today.succ_opt().unwrap());

        assert!(today_hearing.is_upcoming(today));
        assert!(!yesterday.is_upcoming(today));
        assert!(tomorrow.is_upcoming(today));
    }
}
