//! # bo-core
//!
//! Core types, traits, and utilities for Backoffice RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types and the field-keyed `ValidationErrors` collection
//! - Result type aliases
//! - Core traits (Entity, Identifiable, Timestamped)
//! - Service result types (ServiceResult) with per-step saga outcomes
//! - Configuration types

pub mod config;
pub mod error;
pub mod result;
pub mod telemetry;
pub mod traits;

pub use error::*;
pub use result::*;
pub use traits::*;
