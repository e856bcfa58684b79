//! # bo-cases
//!
//! Legal case and hearing management: case CRUD with hearing cascade, the
//! past/upcoming docket partition recomputed at every read, and the document
//! attach/detach lifecycle that keeps hearing PDFs and hearing records in
//! step without a surrounding transaction.

pub mod service;

pub use service::{CaseService, HearingDocket};
