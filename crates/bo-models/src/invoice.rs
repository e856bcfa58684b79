//! Invoice model
//!
//! Table: invoices
//!
//! Linked tasks are discovered through `tasks.invoice_id`, not stored inline.

use bo_core::{Entity, Id, Identifiable, Timestamped};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Option<Id>,

    /// Unique display string, e.g. "INV-2024-0012"
    #[validate(length(min = 1, message = "can't be blank"))]
    pub invoice_number: String,

    pub invoice_date: NaiveDate,

    pub customer_id: Id,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub total_amount: f64,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub paid_amount: f64,

    pub created_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn new(
        invoice_number: impl Into<String>,
        invoice_date: NaiveDate,
        customer_id: Id,
    ) -> Self {
        Self {
            id: None,
            invoice_number: invoice_number.into(),
            invoice_date,
            customer_id,
            total_amount: 0.0,
            paid_amount: 0.0,
            created_at: None,
        }
    }

    pub fn with_amounts(mut self, total_amount: f64, paid_amount: f64) -> Self {
        self.total_amount = total_amount;
        self.paid_amount = paid_amount;
        self
    }

    /// Amount still owed on this invoice.
    pub fn outstanding(&self) -> f64 {
        self.total_amount - self.paid_amount
    }
}

impl Identifiable for Invoice {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Invoice {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for Invoice {
    const TABLE_NAME: &'static str = "invoices";
    const TYPE_NAME: &'static str = "Invoice";
}

/// Partial update for an invoice; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub total_amount: Option<f64>,
    pub paid_amount: Option<f64>,
}

impl InvoicePatch {
    pub fn apply_to(&self, invoice: &mut Invoice) {
        if let Some(invoice_number) = &self.invoice_number {
            invoice.invoice_number = invoice_number.clone();
        }
        if let Some(invoice_date) = self.invoice_date {
            invoice.invoice_date = invoice_date;
        }
        if let Some(total_amount) = self.total_amount {
            invoice.total_amount = total_amount;
        }
        if let Some(paid_amount) = self.paid_amount {
            invoice.paid_amount = paid_amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outstanding() {
        let invoice = Invoice::new(
            "INV-1",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Id::new_v4(),
        )
        .with_amounts(1000.0, 400.0);
        assert_eq!(invoice.outstanding(), 600.0);
    }
}
