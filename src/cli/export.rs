//! CLI command for data export
//!
//! Writes the ledger as a JSON backup, a CSV of transactions or a YAML copy.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::Workspace;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{backup_file_name, csv_file_name, export_transactions_csv, export_yaml};

/// Export format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Ledger document, importable again
    #[default]
    Json,
    /// Transactions only, for spreadsheets
    Csv,
    /// Ledger document, human-readable
    Yaml,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (defaults to a dated file in the exports directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(workspace: &Workspace, args: ExportArgs) -> LedgerResult<()> {
    let today = Workspace::today();
    let output = match args.output {
        Some(path) => path,
        None => {
            workspace.paths.ensure_directories()?;
            let name = match args.format {
                ExportFormat::Json => backup_file_name(today),
                ExportFormat::Csv => csv_file_name(today),
                ExportFormat::Yaml => backup_file_name(today).replace(".json", ".yaml"),
            };
            workspace.paths.exports_dir().join(name)
        }
    };

    let file = File::create(&output).map_err(|e| {
        LedgerError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);
    let export = workspace.ledger.export(chrono::Utc::now());

    match args.format {
        ExportFormat::Json => export.write_json(&mut writer)?,
        ExportFormat::Csv => export_transactions_csv(workspace.ledger.transactions(), &mut writer)?,
        ExportFormat::Yaml => export_yaml(&export, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    println!(
        "Exported {} transactions to: {}",
        workspace.ledger.len(),
        output.display()
    );
    Ok(())
}
