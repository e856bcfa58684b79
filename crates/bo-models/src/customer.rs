//! Customer model
//!
//! Table: customers

use bo_core::{Entity, Id, Identifiable, Timestamped};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer entity, referenced by tasks and invoices.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Option<Id>,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub company_name: String,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub contact_person: String,

    #[validate(email(message = "is not a valid email address"))]
    pub email: String,

    pub phone_number: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(
        company_name: impl Into<String>,
        contact_person: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            company_name: company_name.into(),
            contact_person: contact_person.into(),
            email: email.into(),
            phone_number: None,
            created_at: None,
        }
    }

    pub fn with_phone(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

impl Identifiable for Customer {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Customer {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for Customer {
    const TABLE_NAME: &'static str = "customers";
    const TYPE_NAME: &'static str = "Customer";
}

/// Partial update for a customer; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub company_name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<Option<String>>,
}

impl CustomerPatch {
    pub fn apply_to(&self, customer: &mut Customer) {
        if let Some(company_name) = &self.company_name {
            customer.company_name = company_name.clone();
        }
        if let Some(contact_person) = &self.contact_person {
            customer.contact_person = contact_person.clone();
        }
        if let Some(email) = &self.email {
            customer.email = email.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            customer.phone_number = phone_number.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let customer = Customer::new("Acme Corp", "Wile E.", "wile@acme.example")
            .with_phone("+1 555 0100");
        assert_eq!(customer.phone_number.as_deref(), Some("+1 555 0100"));
    }
}
