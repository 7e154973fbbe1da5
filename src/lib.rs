//! ledger - personal income and expense ledger
//!
//! This library provides the engine behind the `ledger` command: an
//! insertion-ordered store of income and expense transactions, a validator
//! for candidate records, filtered and paginated views, statistics and
//! trend aggregation, a plain-text report and JSON/CSV/YAML import and export.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory paths and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, categories, periods)
//! - `storage`: In-memory store and atomic file writes
//! - `services`: Validation, queries, analytics and the `Ledger` engine
//! - `audit`: Audit logging system
//! - `export`: Ledger document, CSV and YAML formats
//! - `reports`: The summary report
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger::models::TransactionType;
//! use ledger::services::{Ledger, TransactionInput};
//!
//! let mut ledger = Ledger::new();
//! let input = TransactionInput::new("2025-03-02", "Groceries", "Food", 42.5);
//! ledger.add(TransactionType::Expense, &input, today)?;
//! let stats = ledger.stats(today);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
