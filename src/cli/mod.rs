//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger engine.

pub mod audit;
pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use crate::audit::AuditLogger;
use crate::config::{LedgerPaths, Settings};
use crate::display::DisplayOptions;
use crate::error::LedgerResult;
use crate::export::parse_document;
use crate::services::Ledger;
use crate::storage::{read_text_optional, write_text_atomic};

pub use audit::handle_audit_command;
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use import::{handle_clear_command, handle_import_command, ImportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

/// Everything a command needs: resolved paths, settings and the loaded ledger
pub struct Workspace {
    pub paths: LedgerPaths,
    pub settings: Settings,
    pub ledger_file: PathBuf,
    pub ledger: Ledger,
}

impl Workspace {
    /// Load settings and the ledger document. A missing document is an empty ledger.
    pub fn open(paths: LedgerPaths, ledger_file: Option<PathBuf>) -> LedgerResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let ledger_file = ledger_file.unwrap_or_else(|| paths.ledger_file());

        let ledger = match read_text_optional(&ledger_file)? {
            Some(text) => Ledger::from_transactions(parse_document(&text)?)?,
            None => Ledger::new(),
        };
        debug!(path = %ledger_file.display(), count = ledger.len(), "Ledger loaded");

        Ok(Self {
            paths,
            settings,
            ledger_file,
            ledger,
        })
    }

    /// Persist the ledger if anything changed and flush the journal to the audit log
    pub fn save(&mut self) -> LedgerResult<()> {
        let journal = self.ledger.take_journal();
        if journal.is_empty() {
            return Ok(());
        }

        let document = self.ledger.export(chrono::Utc::now()).to_json_string()?;
        write_text_atomic(&self.ledger_file, &document)?;
        debug!(path = %self.ledger_file.display(), "Ledger saved");

        if self.settings.audit_enabled {
            AuditLogger::new(self.paths.audit_log()).log_batch(&journal)?;
        }
        Ok(())
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            currency_symbol: self.settings.currency_symbol.clone(),
            date_format: self.settings.date_format.clone(),
        }
    }

    pub fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
