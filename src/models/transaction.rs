//! Transaction model
//!
//! A transaction is either income or expense. Its type and creation time are
//! fixed; date, description, category, amount and notes change through
//! validated updates, which stamp `updated_at`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parse "income"/"expense" (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// The editable fields of a transaction, as produced by the validator
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Money,
    pub notes: Option<String>,
}

/// A ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Income or expense, fixed at creation
    pub kind: TransactionType,

    /// Calendar day of the transaction
    pub date: NaiveDate,

    /// Trimmed description
    pub description: String,

    /// Category name from the set for `kind`
    pub category: String,

    /// Always positive; the direction comes from `kind`
    pub amount: Money,

    /// Optional free text
    #[serde(default)]
    pub notes: Option<String>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last edited, if ever
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        kind: TransactionType,
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            date,
            description: description.into(),
            category: category.into(),
            amount,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Create a transaction from validated fields
    pub fn from_fields(kind: TransactionType, fields: TransactionFields) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            date: fields.date,
            description: fields.description,
            category: fields.category,
            amount: fields.amount,
            notes: fields.notes,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Overwrite the editable fields and stamp `updated_at`.
    ///
    /// `id`, `kind` and `created_at` are never touched.
    pub fn apply(&mut self, fields: TransactionFields, at: DateTime<Utc>) {
        self.date = fields.date;
        self.description = fields.description;
        self.category = fields.category;
        self.amount = fields.amount;
        self.notes = fields.notes;
        self.updated_at = Some(at);
    }

    /// The current editable fields
    pub fn fields(&self) -> TransactionFields {
        TransactionFields {
            date: self.date,
            description: self.description.clone(),
            category: self.category.clone(),
            amount: self.amount,
            notes: self.notes.clone(),
        }
    }

    /// Builder-style notes setter
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign of its direction (expenses negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Case-insensitive match of an already-lowercased needle against
    /// description, category and notes
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.description.to_lowercase().contains(needle_lower)
            || self.category.to_lowercase().contains(needle_lower)
            || self
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle_lower))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}
