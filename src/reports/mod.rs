//! Reports
//!
//! The plain-text ledger summary with a CSV form of its monthly breakdown.

pub mod summary;

pub use summary::{report_file_name, LedgerReport, REPORT_CATEGORY_LIMIT};
