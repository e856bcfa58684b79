//! # bo-exchange
//!
//! CSV export and import for entity collections.
//!
//! Export and import are deliberately NOT inverses: export quotes fields
//! containing delimiters, quotes, or newlines, while import splits lines on
//! raw commas and does not understand quoting. Round-tripping a value that
//! contains a comma therefore changes it; callers that need fidelity must
//! keep delimiters out of their data.

pub mod csv;

pub use csv::{export_csv, export_records, import_csv, rows_to_objects, to_rows, CsvError, Row};
