//! Employee model
//!
//! Table: employees

use bo_core::{Entity, Id, Identifiable, Timestamped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee entity
///
/// Employees can be assigned to tasks; deleting an employee that is still
/// referenced by tasks is a confirmed two-phase operation handled by the
/// service layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Option<Id>,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub full_name: String,

    #[validate(email(message = "is not a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub position: String,

    pub department: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            email: email.into(),
            position: position.into(),
            department: None,
            created_at: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Employee {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for Employee {
    const TABLE_NAME: &'static str = "employees";
    const TYPE_NAME: &'static str = "Employee";
}

/// Partial update for an employee; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<Option<String>>,
}

impl EmployeePatch {
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(full_name) = &self.full_name {
            employee.full_name = full_name.clone();
        }
        if let Some(email) = &self.email {
            employee.email = email.clone();
        }
        if let Some(position) = &self.position {
            employee.position = position.clone();
        }
        if let Some(department) = &self.department {
            employee.department = department.clone();
        }
    }
}
