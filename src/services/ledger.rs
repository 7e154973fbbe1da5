//! Ledger engine
//!
//! `Ledger` owns the transaction store and is the single entry point for
//! commands. Mutations run through the validator, succeed completely or leave
//! the store untouched, and append an entry to the audit journal. Derived
//! views are recomputed from the store on every call.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, Operation};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{ImportMode, LedgerExport};
use crate::models::{MonthKey, Period, Transaction, TransactionId, TransactionType};
use crate::services::analytics::{self, CategoryTotal, MonthSummary, Stats, TrendSeries};
use crate::services::query::{self, Page, TransactionFilter};
use crate::services::validation::{validate, TransactionInput};
use crate::storage::TransactionStore;

/// Outcome of an import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub mode: ImportMode,
    /// Records taken from the document
    pub imported: usize,
    /// Transactions in the ledger afterwards
    pub total: usize,
}

/// The transaction ledger and its audit journal
#[derive(Debug, Default)]
pub struct Ledger {
    store: TransactionStore,
    journal: Vec<AuditEntry>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a ledger over existing transactions, e.g. a loaded document
    pub fn from_transactions(transactions: Vec<Transaction>) -> LedgerResult<Self> {
        Ok(Self {
            store: TransactionStore::from_transactions(transactions)?,
            journal: Vec::new(),
        })
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        self.store.all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> LedgerResult<&Transaction> {
        self.store
            .get(id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))
    }

    /// Resolve a user-typed identifier (full UUID, `txn-` short form or hex
    /// prefix) to exactly one transaction
    pub fn find_by_prefix(&self, needle: &str) -> LedgerResult<&Transaction> {
        let matches = self.store.find_by_prefix(needle);
        match matches.as_slice() {
            [txn] => Ok(txn),
            [] => Err(LedgerError::transaction_not_found(needle.trim())),
            _ => Err(LedgerError::Ambiguous(needle.trim().to_string())),
        }
    }

    /// Validate and add a new transaction
    pub fn add(
        &mut self,
        kind: TransactionType,
        input: &TransactionInput,
        today: NaiveDate,
    ) -> LedgerResult<&Transaction> {
        let fields = validate(kind, input, today).map_err(|e| {
            warn!(%kind, reason = %e, "Rejected new transaction");
            LedgerError::from(e)
        })?;

        let mut txn = Transaction::from_fields(kind, fields);
        txn.id = self.fresh_id(&HashSet::new());
        let entry = AuditEntry::added(&txn);
        let amount = txn.amount;
        let id = self.store.add(txn)?;

        info!(id = %id, %kind, amount = %amount, "Transaction added");
        self.journal.push(entry);
        self.get(id)
    }

    /// Validate new field values and apply them to an existing transaction.
    ///
    /// The transaction keeps its id, type and creation time.
    pub fn update(
        &mut self,
        id: TransactionId,
        input: &TransactionInput,
        today: NaiveDate,
    ) -> LedgerResult<&Transaction> {
        let before = self.get(id)?.clone();

        let fields = validate(before.kind, input, today).map_err(|e| {
            warn!(id = %id, reason = %e, "Rejected transaction update");
            LedgerError::from(e)
        })?;

        let after = self.store.update(id, fields, Utc::now())?.clone();

        let entry = AuditEntry::edited(&before, &after);
        info!(
            id = %id,
            changes = entry.diff_summary.as_deref().unwrap_or("none"),
            "Transaction updated"
        );
        self.journal.push(entry);
        self.get(id)
    }

    /// Remove a transaction, returning it
    pub fn delete(&mut self, id: TransactionId) -> LedgerResult<Transaction> {
        let removed = self.store.remove(id)?;

        info!(id = %id, "Transaction deleted");
        self.journal.push(AuditEntry::removed(&removed));
        Ok(removed)
    }

    /// Remove every transaction, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.store.clear();

        info!(removed, "Ledger cleared");
        self.journal.push(AuditEntry::bulk(
            Operation::Clear,
            format!("{} transactions removed", removed),
        ));
        removed
    }

    /// Bring parsed records into the ledger.
    ///
    /// Merge appends every record under a fresh id, leaving existing
    /// transactions untouched. Replace discards the ledger and adopts the
    /// records exactly as given; a batch that repeats an id is refused with a
    /// format error. Records are not re-validated in either mode.
    pub fn import(
        &mut self,
        records: Vec<Transaction>,
        mode: ImportMode,
    ) -> LedgerResult<ImportSummary> {
        let imported = records.len();

        match mode {
            ImportMode::Merge => {
                let mut assigned = HashSet::with_capacity(imported);
                let records: Vec<Transaction> = records
                    .into_iter()
                    .map(|mut txn| {
                        txn.id = self.fresh_id(&assigned);
                        assigned.insert(txn.id);
                        txn
                    })
                    .collect();
                self.store.append_all(records)?;
            }
            ImportMode::Replace => {
                self.store.replace_all(records).map_err(|e| match e {
                    LedgerError::Duplicate { identifier, .. } => {
                        warn!(%identifier, "Rejected import with repeated id");
                        LedgerError::Format(format!(
                            "duplicate transaction id in document: {}",
                            identifier
                        ))
                    }
                    other => other,
                })?;
            }
        }

        let summary = ImportSummary {
            mode,
            imported,
            total: self.store.len(),
        };
        info!(%mode, imported, total = summary.total, "Import complete");
        self.journal.push(AuditEntry::bulk(
            Operation::Import,
            format!("{}: {} imported, {} total", mode, imported, summary.total),
        ));
        Ok(summary)
    }

    /// Snapshot of the ledger as a document
    pub fn export(&self, exported_at: DateTime<Utc>) -> LedgerExport {
        debug!(count = self.store.len(), "Exporting ledger");
        LedgerExport::from_transactions(self.store.all(), exported_at)
    }

    /// Filtered view, newest first
    pub fn view(&self, filter: &TransactionFilter, today: NaiveDate) -> Vec<&Transaction> {
        let view = query::filtered_view(self.store.all(), filter, today);
        debug!(matched = view.len(), total = self.store.len(), "Filtered view");
        view
    }

    /// One page of a filtered view
    pub fn page(
        &self,
        filter: &TransactionFilter,
        today: NaiveDate,
        page: usize,
        page_size: usize,
    ) -> Page<'_> {
        query::paginate(&self.view(filter, today), page, page_size)
    }

    pub fn stats(&self, today: NaiveDate) -> Stats {
        analytics::compute_stats(self.store.all(), today)
    }

    /// The five largest expense categories
    pub fn breakdown(&self) -> Vec<CategoryTotal> {
        analytics::category_breakdown(self.store.all())
    }

    pub fn top_categories(&self, limit: usize) -> Vec<CategoryTotal> {
        analytics::top_expense_categories(self.store.all(), limit)
    }

    pub fn expense_distribution(
        &self,
        period: Period,
        today: NaiveDate,
        week_start: Weekday,
    ) -> Vec<CategoryTotal> {
        analytics::expense_distribution(self.store.all(), period, today, week_start)
    }

    pub fn trend(&self, today: NaiveDate) -> TrendSeries {
        analytics::monthly_trend(self.store.all(), today)
    }

    pub fn month_summary(&self, month: MonthKey) -> MonthSummary {
        analytics::month_summary(self.store.all(), month)
    }

    /// Categories in use, first-seen order
    pub fn categories(&self) -> Vec<String> {
        analytics::distinct_categories(self.store.all())
    }

    /// Audit entries recorded since the journal was last drained
    pub fn journal(&self) -> &[AuditEntry] {
        &self.journal
    }

    /// Drain the audit journal
    pub fn take_journal(&mut self) -> Vec<AuditEntry> {
        std::mem::take(&mut self.journal)
    }

    /// An id not present in the store or in `reserved`
    fn fresh_id(&self, reserved: &HashSet<TransactionId>) -> TransactionId {
        loop {
            let id = TransactionId::new();
            if !self.store.contains(id) && !reserved.contains(&id) {
                return id;
            }
        }
    }
}
