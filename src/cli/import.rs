//! CLI commands for importing a ledger document and clearing the ledger

use std::path::PathBuf;

use clap::Args;

use super::Workspace;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{parse_document, parse_yaml_document, ImportMode};
use crate::storage::read_text_optional;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON (or .yaml/.yml) ledger document
    pub file: PathBuf,

    /// merge appends with fresh ids; replace discards the current ledger
    #[arg(short, long, default_value = "merge", value_parser = parse_mode)]
    pub mode: ImportMode,
}

fn parse_mode(s: &str) -> Result<ImportMode, String> {
    ImportMode::parse(s).ok_or_else(|| format!("'{}' is not merge or replace", s))
}

/// Handle the import command
pub fn handle_import_command(workspace: &mut Workspace, args: ImportArgs) -> LedgerResult<()> {
    let text = read_text_optional(&args.file)?.ok_or_else(|| {
        LedgerError::Io(format!("File not found: {}", args.file.display()))
    })?;

    let is_yaml = args.file.extension().is_some_and(|ext| {
        ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
    });
    let records = if is_yaml {
        parse_yaml_document(&text)?
    } else {
        parse_document(&text)?
    };

    let summary = workspace.ledger.import(records, args.mode)?;
    println!(
        "Imported {} transactions ({}). Ledger now has {}.",
        summary.imported, summary.mode, summary.total
    );
    Ok(())
}

/// Handle the clear command
pub fn handle_clear_command(workspace: &mut Workspace, confirmed: bool) -> LedgerResult<()> {
    if !confirmed {
        return Err(LedgerError::Validation(
            "Refusing to delete every transaction without --yes".into(),
        ));
    }

    let removed = workspace.ledger.clear();
    println!("Removed {} transactions.", removed);
    Ok(())
}
