//! # bo-reports
//!
//! Read-only aggregation over the task and invoice collections: per-employee
//! and per-customer billing/completion summaries with an optional inclusive
//! due-date window, plus system-wide dashboard counters.
//!
//! The grouping math is pure (`summary::summarize`); the services only fetch
//! and delegate, so every rule is unit-testable without a store.

pub mod dashboard;
pub mod summary;

pub use dashboard::{DashboardService, DashboardStats};
pub use summary::{DateRange, GroupKey, GroupSummary, ReportService};
