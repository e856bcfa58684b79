//! Legal case model
//!
//! Table: legal_cases

use bo_core::{Entity, Id, Identifiable, Timestamped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Legal case entity, owning zero or more hearings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LegalCase {
    pub id: Option<Id>,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub case_number: String,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub court_name: String,

    pub location: String,

    /// Petitioner vs respondent, e.g. "Doe vs Roe"
    pub parties: String,

    pub summary: String,

    pub created_at: Option<DateTime<Utc>>,
}

impl LegalCase {
    pub fn new(case_number: impl Into<String>, court_name: impl Into<String>) -> Self {
        Self {
            id: None,
            case_number: case_number.into(),
            court_name: court_name.into(),
            location: String::new(),
            parties: String::new(),
            summary: String::new(),
            created_at: None,
        }
    }

    pub fn with_parties(mut self, parties: impl Into<String>) -> Self {
        self.parties = parties.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

impl Identifiable for LegalCase {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for LegalCase {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for LegalCase {
    const TABLE_NAME: &'static str = "legal_cases";
    const TYPE_NAME: &'static str = "LegalCase";
}

/// Partial update for a legal case; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalCasePatch {
    pub case_number: Option<String>,
    pub court_name: Option<String>,
    pub location: Option<String>,
    pub parties: Option<String>,
    pub summary: Option<String>,
}

impl LegalCasePatch {
    pub fn apply_to(&self, case: &mut LegalCase) {
        if let Some(case_number) = &self.case_number {
            case.case_number = case_number.clone();
        }
        if let Some(court_name) = &self.court_name {
            case.court_name = court_name.clone();
        }
        if let Some(location) = &self.location {
            case.location = location.clone();
        }
        if let Some(parties) = &self.parties {
            case.parties = parties.clone();
        }
        if let Some(summary) = &self.summary {
            case.summary = summary.clone();
        }
    }
}
