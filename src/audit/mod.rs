//! Audit trail for ledger mutations
//!
//! Every add, edit, delete, import and clear produces an `AuditEntry`. The
//! ledger keeps entries in an in-memory journal; the command line drains the
//! journal into an append-only JSON-lines file through `AuditLogger` once the
//! ledger document has been saved.
//!
//! ```rust,ignore
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log_batch(&ledger.take_journal())?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::transaction_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
