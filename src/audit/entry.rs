//! Audit journal entries
//!
//! One entry per ledger mutation. Single-transaction entries keep the JSON
//! snapshot of the record on each side of the change; bulk entries (import,
//! clear) only carry a summary line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::transaction_changes;
use crate::models::Transaction;

/// Kind of mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// A batch of records was merged in or replaced the ledger
    Import,
    /// Every transaction was removed
    Clear,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Import => "IMPORT",
            Operation::Clear => "CLEAR",
        };
        f.write_str(label)
    }
}

/// What an entry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    /// The ledger as a whole
    Ledger,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Transaction => f.write_str("Transaction"),
            EntityType::Ledger => f.write_str("Ledger"),
        }
    }
}

/// Entity id recorded for bulk operations
const LEDGER_ENTITY_ID: &str = "ledger";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Short display id of the transaction, or "ledger"
    pub entity_id: String,

    /// Transaction description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// e.g. `amount: 5.0 -> 7.5`, or the bulk summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn for_transaction(
        operation: Operation,
        txn: &Transaction,
        before: Option<Value>,
        after: Option<Value>,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type: EntityType::Transaction,
            entity_id: txn.id.to_string(),
            entity_name: Some(txn.description.clone()),
            before,
            after,
            diff_summary,
        }
    }

    /// A transaction was added
    pub fn added(txn: &Transaction) -> Self {
        Self::for_transaction(Operation::Create, txn, None, snapshot(txn), None)
    }

    /// A transaction was edited
    pub fn edited(before: &Transaction, after: &Transaction) -> Self {
        Self::for_transaction(
            Operation::Update,
            after,
            snapshot(before),
            snapshot(after),
            transaction_changes(before, after),
        )
    }

    /// A transaction was removed
    pub fn removed(txn: &Transaction) -> Self {
        Self::for_transaction(Operation::Delete, txn, snapshot(txn), None, None)
    }

    /// Import or clear, described by `summary`
    pub fn bulk(operation: Operation, summary: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type: EntityType::Ledger,
            entity_id: LEDGER_ENTITY_ID.to_string(),
            entity_name: None,
            before: None,
            after: None,
            diff_summary: Some(summary.into()),
        }
    }

    /// One line per entry, plus an indented change line when there is one
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );
        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }
        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }
        output
    }
}

fn snapshot(txn: &Transaction) -> Option<Value> {
    serde_json::to_value(txn).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::NaiveDate;

    fn coffee(cents: i64) -> Transaction {
        Transaction::new(
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            "Coffee beans",
            "Food",
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_added_snapshots_the_new_record() {
        let txn = coffee(500);
        let entry = AuditEntry::added(&txn);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_id, txn.id.to_string());
        assert_eq!(entry.entity_name.as_deref(), Some("Coffee beans"));
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().unwrap()["amount"], 5.0);
    }

    #[test]
    fn test_edited_records_amount_change() {
        let before = coffee(500);
        let mut after = before.clone();
        let mut fields = after.fields();
        fields.amount = Money::from_cents(750);
        after.apply(fields, Utc::now());

        let entry = AuditEntry::edited(&before, &after);
        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.diff_summary.as_deref(), Some("amount: 5.0 -> 7.5"));
        assert!(entry.before.is_some() && entry.after.is_some());
    }

    #[test]
    fn test_removed_keeps_only_before() {
        let entry = AuditEntry::removed(&coffee(500));
        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_bulk_entry() {
        let entry = AuditEntry::bulk(Operation::Import, "merge: 3 imported, 10 total");
        assert_eq!(entry.entity_type, EntityType::Ledger);
        assert_eq!(entry.entity_id, "ledger");

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("IMPORT Ledger ledger"));
        assert!(formatted.ends_with("\n  Changes: merge: 3 imported, 10 total"));
    }

    #[test]
    fn test_json_line_omits_empty_sides() {
        let entry = AuditEntry::bulk(Operation::Clear, "5 transactions removed");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"before\""));
        assert!(json.contains("\"operation\":\"clear\""));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.operation, Operation::Clear);
        assert_eq!(back.entity_type, EntityType::Ledger);
    }
}
