//! # bo-store
//!
//! Entity storage for Backoffice RS.
//!
//! Business logic never depends on a concrete container: it talks to the
//! [`store::EntityStore`] trait family, with two implementations behind it:
//! - [`memory::MemoryStore`] — in-process maps, used as the test double
//! - [`postgres`] — sqlx repositories over the durable backend
//!
//! Stores give no ordering guarantee on listing; callers sort explicitly.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{
    CaseStore, CustomerStore, EmployeeStore, EntityStore, HearingQueries, HearingStore,
    InvoiceStore, PaymentStore, TaskQueries, TaskStore,
};
