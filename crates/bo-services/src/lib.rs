//! # bo-services
//!
//! The write side of the backoffice core: validation-gated create/update
//! services per entity, the task status lifecycle, and the multi-step sagas
//! (employee deletion, task billing, payment recording) whose partial
//! completion is reported step by step rather than rolled back.

pub mod billing;
pub mod customers;
pub mod employees;
pub mod lifecycle;
pub mod notify;
pub mod tasks;

pub use billing::{BillTaskService, RecordPaymentService};
pub use customers::{CreateCustomerService, UpdateCustomerService};
pub use employees::{CreateEmployeeService, DeleteEmployeeService, UpdateEmployeeService};
pub use lifecycle::{effective_status, is_completed_label};
pub use notify::{notify_assignment, notify_invoice_issued};
pub use tasks::{CreateTaskService, TaskParams, UpdateTaskService};
