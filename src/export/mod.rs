//! Import and export of ledger data
//!
//! - JSON: the ledger document used for backups, imports and the ledger file
//! - CSV: transactions for spreadsheets
//! - YAML: human-readable copy of the ledger document

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{csv_file_name, export_transactions_csv};
pub use json::{
    backup_file_name, parse_document, ImportMode, LedgerExport, TransactionRecord, EXPORT_VERSION,
    MAX_DOCUMENT_CENTS,
};
pub use yaml::{export_yaml, parse_yaml_document};
