//! JSON ledger document
//!
//! The document is the interchange format for backups, imports and the
//! on-disk ledger file:
//!
//! ```json
//! { "transactions": [ ... ], "exportDate": "2025-01-15T10:00:00Z", "version": "1.0" }
//! ```
//!
//! Records use camelCase keys. `timestamp` repeats `createdAt` for readers
//! that only know the older key, and is used as `createdAt` when that key is
//! missing on input.

use std::fmt;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionId, TransactionType};

/// Largest amount magnitude a document may carry, in cents (2^53, the
/// range where a JSON number still holds every cent exactly)
pub const MAX_DOCUMENT_CENTS: i64 = 9_007_199_254_740_992;

/// Document format version written on export
pub const EXPORT_VERSION: &str = "1.0";

/// One transaction as it appears in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Money,
    /// Empty when the transaction has no notes
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id,
            kind: txn.kind,
            date: txn.date,
            description: txn.description.clone(),
            category: txn.category.clone(),
            amount: txn.amount,
            notes: txn.notes.clone().unwrap_or_default(),
            timestamp: Some(txn.created_at),
            created_at: Some(txn.created_at),
            updated_at: txn.updated_at,
        }
    }
}

impl TransactionRecord {
    /// Convert to a transaction. Fails when no creation time is present.
    pub fn into_transaction(self) -> Result<Transaction, String> {
        let created_at = self
            .created_at
            .or(self.timestamp)
            .ok_or_else(|| "missing createdAt/timestamp".to_string())?;

        if self.amount.abs().cents() > MAX_DOCUMENT_CENTS {
            return Err(format!(
                "amount {} is out of range",
                self.amount.to_plain_string()
            ));
        }

        let notes = if self.notes.trim().is_empty() {
            None
        } else {
            Some(self.notes)
        };

        Ok(Transaction {
            id: self.id,
            kind: self.kind,
            date: self.date,
            description: self.description,
            category: self.category,
            amount: self.amount,
            notes,
            created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A complete ledger document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerExport {
    pub transactions: Vec<TransactionRecord>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

impl LedgerExport {
    /// Snapshot of `transactions` in store order
    pub fn from_transactions(transactions: &[Transaction], exported_at: DateTime<Utc>) -> Self {
        Self {
            transactions: transactions.iter().map(TransactionRecord::from).collect(),
            export_date: exported_at,
            version: EXPORT_VERSION.to_string(),
        }
    }

    pub fn to_json_string(&self) -> LedgerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LedgerError::Export(e.to_string()))
    }

    pub fn write_json<W: Write>(&self, writer: &mut W) -> LedgerResult<()> {
        serde_json::to_writer_pretty(&mut *writer, self)
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))
    }
}

/// How imported records combine with the existing ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Append with freshly assigned ids
    #[default]
    Merge,
    /// Discard the ledger and adopt the records verbatim
    Replace,
}

impl ImportMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Some(Self::Merge),
            "replace" => Some(Self::Replace),
            _ => None,
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// Parse a JSON ledger document into transactions, in document order.
///
/// Fails with `LedgerError::Format` when the text is not JSON, has no
/// `transactions` array, or contains a malformed record.
pub fn parse_document(text: &str) -> LedgerResult<Vec<Transaction>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| LedgerError::Format(format!("not a JSON document: {}", e)))?;
    parse_value(value)
}

/// Parse an already-decoded document tree (JSON or YAML)
pub(crate) fn parse_value(value: Value) -> LedgerResult<Vec<Transaction>> {
    let records = match value {
        Value::Object(mut map) => match map.remove("transactions") {
            Some(Value::Array(records)) => records,
            Some(_) => {
                return Err(LedgerError::Format(
                    "'transactions' must be an array".into(),
                ))
            }
            None => {
                return Err(LedgerError::Format(
                    "missing 'transactions' array".into(),
                ))
            }
        },
        _ => {
            return Err(LedgerError::Format(
                "document must be an object with a 'transactions' array".into(),
            ))
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            serde_json::from_value::<TransactionRecord>(raw)
                .map_err(|e| e.to_string())
                .and_then(TransactionRecord::into_transaction)
                .map_err(|e| LedgerError::Format(format!("record {}: {}", i + 1, e)))
        })
        .collect()
}

/// Default backup file name, e.g. `expense-tracker-backup-2025-01-15.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("expense-tracker-backup-{}.json", date.format("%Y-%m-%d"))
}
