//! Payment model
//!
//! Table: payments
//!
//! Recording a payment also accrues onto the invoice's paid amount; that
//! second write is a saga step owned by the service layer.

use bo_core::{Entity, Id, Identifiable, Timestamped};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::task::ParseEnumError;

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "UPI")]
    Upi,
    Card,
}

impl PaymentMethod {
    pub fn parse(s: &str) -> Result<Self, ParseEnumError> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "bank transfer" | "bank_transfer" => Ok(Self::BankTransfer),
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            _ => Err(ParseEnumError {
                kind: "payment method",
                value: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::BankTransfer => "Bank Transfer",
            Self::Upi => "UPI",
            Self::Card => "Card",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Option<Id>,

    pub invoice_id: Id,

    pub payment_date: NaiveDate,

    /// Strictly positive; a zero payment is a data-entry error.
    #[validate(range(min = 0.01, message = "must be positive"))]
    pub amount: f64,

    pub method: PaymentMethod,

    pub reference: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn new(invoice_id: Id, payment_date: NaiveDate, amount: f64, method: PaymentMethod) -> Self {
        Self {
            id: None,
            invoice_id,
            payment_date,
            amount,
            method,
            reference: None,
            created_at: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Payment {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for Payment {
    const TABLE_NAME: &'static str = "payments";
    const TYPE_NAME: &'static str = "Payment";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_record;

    #[test]
    fn test_method_parse() {
        assert_eq!(
            PaymentMethod::parse("bank transfer").unwrap(),
            PaymentMethod::BankTransfer
        );
        assert_eq!(PaymentMethod::parse("UPI").unwrap(), PaymentMethod::Upi);
        assert!(PaymentMethod::parse("barter").is_err());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let payment = Payment::new(
            Id::new_v4(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            0.0,
            PaymentMethod::Cash,
        );
        let errors = validate_record(&payment).unwrap_err();
        assert!(errors.has_error("amount"));
    }
}
