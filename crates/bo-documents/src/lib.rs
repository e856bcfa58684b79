//! # bo-documents
//!
//! Document storage boundary for Backoffice RS: a unified async interface
//! over content-addressed blobs (hearing PDFs and other uploads), with a
//! local-filesystem backend and an in-memory test double.

pub mod storage;

pub use storage::{
    generate_disk_filename, DocumentStorage, LocalStorage, MemoryStorage, StorageError,
    StorageResult, StoredDocument,
};
