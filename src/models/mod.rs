//! Core data models
//!
//! Transactions, their identifiers, money amounts, the fixed category sets and
//! the calendar periods used by filtering and statistics.

pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{categories_for, is_valid_category, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use ids::{IdParseError, LegacyId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{MonthKey, Period, PeriodParseError};
pub use transaction::{Transaction, TransactionFields, TransactionType};
