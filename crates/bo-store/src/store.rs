//! Store traits
//!
//! One generic CRUD trait per entity/patch pair plus per-entity query
//! extensions. Service code takes these as bounds so the memory and Postgres
//! backends are interchangeable.

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{
    Customer, CustomerPatch, Employee, EmployeePatch, Hearing, HearingPatch, Invoice,
    InvoicePatch, LegalCase, LegalCasePatch, Payment, Task, TaskPatch,
};

use crate::error::StoreResult;

/// Generic CRUD primitives over one entity type.
///
/// `create` assigns the identifier and creation timestamp and returns the
/// persisted record. `update` shallow-merges the patch; it does not validate
/// cross-field consistency (validation is a pre-store gate). `list` gives no
/// ordering guarantee.
#[async_trait]
pub trait EntityStore<T, P>: Send + Sync {
    async fn get(&self, id: Id) -> StoreResult<Option<T>>;

    async fn list(&self) -> StoreResult<Vec<T>>;

    async fn create(&self, record: T) -> StoreResult<T>;

    /// Returns `None` when no record with this id exists.
    async fn update(&self, id: Id, patch: P) -> StoreResult<Option<T>>;

    /// Returns `true` if a record existed and was removed.
    async fn delete(&self, id: Id) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<i64>;
}

/// Task-specific lookups beyond plain CRUD.
#[async_trait]
pub trait TaskQueries: Send + Sync {
    async fn find_by_employee(&self, employee_id: Id) -> StoreResult<Vec<Task>>;

    async fn find_by_customer(&self, customer_id: Id) -> StoreResult<Vec<Task>>;

    /// Tasks for a customer that have not yet been converted to an invoice.
    async fn find_unbilled(&self, customer_id: Id) -> StoreResult<Vec<Task>>;

    async fn find_by_invoice(&self, invoice_id: Id) -> StoreResult<Vec<Task>>;

    /// Bulk-null the employee reference on every task assigned to this
    /// employee; returns the number of tasks touched.
    async fn clear_employee(&self, employee_id: Id) -> StoreResult<u64>;
}

/// Hearing lookups beyond plain CRUD.
#[async_trait]
pub trait HearingQueries: Send + Sync {
    async fn find_by_case(&self, case_id: Id) -> StoreResult<Vec<Hearing>>;
}

/// Payment storage.
///
/// Payments are append-only; there is no partial update.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn get(&self, id: Id) -> StoreResult<Option<Payment>>;

    async fn list(&self) -> StoreResult<Vec<Payment>>;

    async fn create(&self, record: Payment) -> StoreResult<Payment>;

    async fn delete(&self, id: Id) -> StoreResult<bool>;

    async fn find_by_invoice(&self, invoice_id: Id) -> StoreResult<Vec<Payment>>;
}

pub trait EmployeeStore: EntityStore<Employee, EmployeePatch> {}
impl<S> EmployeeStore for S where S: EntityStore<Employee, EmployeePatch> {}

pub trait CustomerStore: EntityStore<Customer, CustomerPatch> {}
impl<S> CustomerStore for S where S: EntityStore<Customer, CustomerPatch> {}

pub trait TaskStore: EntityStore<Task, TaskPatch> + TaskQueries {}
impl<S> TaskStore for S where S: EntityStore<Task, TaskPatch> + TaskQueries {}

pub trait InvoiceStore: EntityStore<Invoice, InvoicePatch> {}
impl<S> InvoiceStore for S where S: EntityStore<Invoice, InvoicePatch> {}

pub trait CaseStore: EntityStore<LegalCase, LegalCasePatch> {}
impl<S> CaseStore for S where S: EntityStore<LegalCase, LegalCasePatch> {}

pub trait HearingStore: EntityStore<Hearing, HearingPatch> + HearingQueries {}
impl<S> HearingStore for S where S: EntityStore<Hearing, HearingPatch> + HearingQueries {}
