//! Storage layer
//!
//! The in-memory transaction store plus the JSON file helpers the command
//! line uses to load and save a ledger document.

pub mod file_io;
pub mod transactions;

pub use file_io::{read_json, read_text_optional, write_json_atomic, write_text_atomic};
pub use transactions::TransactionStore;
