//! Service layer
//!
//! Validation, querying and aggregation over the transaction store, and the
//! `Ledger` engine that ties them together.

pub mod analytics;
pub mod ledger;
pub mod query;
pub mod validation;

pub use analytics::{CategoryTotal, MonthSummary, MonthlyTotals, Stats, TrendSeries};
pub use ledger::{ImportSummary, Ledger};
pub use query::{change_page, filtered_view, paginate, Page, TransactionFilter};
pub use validation::{validate, TransactionInput, ValidatedFields, ValidationError};
