//! In-memory transaction store
//!
//! Holds the canonical, insertion-ordered list of transactions. Every method
//! either applies its change completely or leaves the store untouched.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionFields, TransactionId};

/// Insertion-ordered transaction collection with unique ids
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, rejecting duplicate ids
    pub fn from_transactions(transactions: Vec<Transaction>) -> LedgerResult<Self> {
        ensure_unique_ids(&transactions)?;
        Ok(Self { transactions })
    }

    /// All transactions in insertion order
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.get(id).is_some()
    }

    /// Append a transaction
    pub fn add(&mut self, txn: Transaction) -> LedgerResult<TransactionId> {
        if self.contains(txn.id) {
            return Err(LedgerError::duplicate_transaction(txn.id.to_string()));
        }
        let id = txn.id;
        self.transactions.push(txn);
        Ok(id)
    }

    /// Overwrite the editable fields of a transaction in place
    pub fn update(
        &mut self,
        id: TransactionId,
        fields: TransactionFields,
        at: DateTime<Utc>,
    ) -> LedgerResult<&Transaction> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        txn.apply(fields, at);
        Ok(txn)
    }

    /// Remove a transaction, returning it
    pub fn remove(&mut self, id: TransactionId) -> LedgerResult<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        Ok(self.transactions.remove(index))
    }

    /// Drop every transaction, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.transactions.len();
        self.transactions.clear();
        count
    }

    /// Replace the whole contents. A batch with duplicate ids is refused.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> LedgerResult<()> {
        ensure_unique_ids(&transactions)?;
        self.transactions = transactions;
        Ok(())
    }

    /// Append a batch. Fails without changes if any id is already present or
    /// repeated within the batch.
    pub fn append_all(&mut self, transactions: Vec<Transaction>) -> LedgerResult<()> {
        let mut seen: HashSet<TransactionId> = self.transactions.iter().map(|t| t.id).collect();
        for txn in &transactions {
            if !seen.insert(txn.id) {
                return Err(LedgerError::duplicate_transaction(txn.id.to_string()));
            }
        }
        self.transactions.extend(transactions);
        Ok(())
    }

    /// Transactions whose id matches a user-typed prefix
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.id.matches_prefix(prefix))
            .collect()
    }
}

fn ensure_unique_ids(transactions: &[Transaction]) -> LedgerResult<()> {
    let mut seen = HashSet::with_capacity(transactions.len());
    for txn in transactions {
        if !seen.insert(txn.id) {
            return Err(LedgerError::duplicate_transaction(txn.id.to_string()));
        }
    }
    Ok(())
}
