//! # bo-models
//!
//! Domain entity models for Backoffice RS: employees, customers, tasks,
//! invoices, payments, legal cases, and hearings.
//!
//! Each entity carries its invariants at the type level (required vs. optional
//! fields, enum-typed statuses) and a `validator` derive for the field-level
//! checks that gate writes before they reach the store.

pub mod customer;
pub mod employee;
pub mod hearing;
pub mod invoice;
pub mod legal_case;
pub mod payment;
pub mod task;
pub mod validation;

pub use customer::{Customer, CustomerPatch};
pub use employee::{Employee, EmployeePatch};
pub use hearing::{Hearing, HearingPatch};
pub use invoice::{Invoice, InvoicePatch};
pub use legal_case::{LegalCase, LegalCasePatch};
pub use payment::{Payment, PaymentMethod};
pub use task::{Priority, Task, TaskPatch, TaskStatus};
pub use validation::validate_record;
