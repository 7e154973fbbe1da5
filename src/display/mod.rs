//! Display formatting for terminal output

pub mod report;
pub mod transaction;

pub use report::{format_breakdown, format_stats, format_trend};
pub use transaction::{format_page, format_transaction_details, format_transaction_table, DisplayOptions};
