//! Transaction validation
//!
//! Pure rule set applied to candidate field values before an add or update
//! reaches the store. Rules run in a fixed order and the first failure wins.

use chrono::{Months, NaiveDate};
use thiserror::Error;

use crate::error::LedgerError;
use crate::models::category::canonical_category;
use crate::models::{Money, TransactionFields, TransactionType};

/// Largest amount accepted for a single transaction, in cents
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000);

pub const MIN_DESCRIPTION_CHARS: usize = 3;
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Fields that passed validation, ready for the store
pub type ValidatedFields = TransactionFields;

/// Raw, user-supplied field values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionInput {
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    pub category: String,
    /// Amount in currency units
    pub amount: f64,
    pub notes: Option<String>,
}

impl TransactionInput {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            category: category.into(),
            amount,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Input pre-filled from existing fields, for partial edits
    pub fn from_fields(fields: &TransactionFields) -> Self {
        Self {
            date: fields.date.format("%Y-%m-%d").to_string(),
            description: fields.description.clone(),
            category: fields.category.clone(),
            amount: fields.amount.as_f64(),
            notes: fields.notes.clone(),
        }
    }
}

/// Reason a candidate transaction was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a date.")]
    MissingDate,

    #[error("Invalid date '{0}': expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Date cannot be more than 1 year in the future.")]
    DateTooFarInFuture,

    #[error("Description must be at least 3 characters long.")]
    DescriptionTooShort,

    #[error("Description cannot exceed 100 characters.")]
    DescriptionTooLong,

    #[error("Please select a category.")]
    MissingCategory,

    #[error("Category '{category}' is not valid for {kind} transactions.")]
    UnknownCategory {
        kind: TransactionType,
        category: String,
    },

    #[error("Please enter a valid amount greater than 0.")]
    InvalidAmount,

    #[error("Amount cannot exceed $1,000,000.")]
    AmountTooLarge,
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::Validation(err.to_string())
    }
}

/// Validate candidate fields for a transaction of `kind`.
///
/// On success the description and notes are trimmed, blank notes become
/// `None`, and the category is normalized to its canonical spelling.
pub fn validate(
    kind: TransactionType,
    input: &TransactionInput,
    today: NaiveDate,
) -> Result<ValidatedFields, ValidationError> {
    let date = validate_date(&input.date, today)?;
    let description = validate_description(&input.description)?;
    let category = validate_category(kind, &input.category)?;
    let amount = validate_amount(input.amount)?;

    let notes = input
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    Ok(ValidatedFields {
        date,
        description,
        category,
        amount,
        notes,
    })
}

fn validate_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))?;

    // A missing upper bound only happens at the end of chrono's range
    let limit = today.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX);
    if date > limit {
        return Err(ValidationError::DateTooFarInFuture);
    }
    Ok(date)
}

fn validate_description(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooShort);
    }
    if len > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(trimmed.to_string())
}

fn validate_category(kind: TransactionType, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    canonical_category(kind, trimmed)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::UnknownCategory {
            kind,
            category: trimmed.to_string(),
        })
}

fn validate_amount(raw: f64) -> Result<Money, ValidationError> {
    if !raw.is_finite() || raw <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }
    if raw > MAX_AMOUNT.as_f64() {
        return Err(ValidationError::AmountTooLarge);
    }
    match Money::from_f64(raw) {
        Some(amount) if amount.is_positive() => Ok(amount),
        _ => Err(ValidationError::InvalidAmount),
    }
}
