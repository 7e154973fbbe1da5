use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ledger::cli::{
    handle_audit_command, handle_clear_command, handle_export_command, handle_import_command,
    handle_report_command, handle_transaction_command, ExportArgs, ImportArgs, ReportCommands,
    TransactionCommands, Workspace,
};
use ledger::config::{LedgerPaths, Settings};

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal income and expense ledger",
    long_about = "ledger records income and expense transactions, filters and pages \
                  through them, and summarizes them as statistics, category \
                  breakdowns, a twelve-month trend and a plain-text report."
)]
struct Cli {
    /// Ledger document to use instead of the one in the data directory
    #[arg(long, global = true, env = "LEDGER_CLI_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Export the ledger
    Export(ExportArgs),

    /// Import a ledger document
    Import(ImportArgs),

    /// Delete every transaction
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = LedgerPaths::new()?;

    let Some(command) = cli.command else {
        println!("ledger - personal income and expense ledger");
        println!();
        println!("Run 'ledger --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Config => {
            let settings = Settings::load_or_create(&paths)?;
            println!("Ledger Configuration");
            println!("====================");
            println!("Data directory:  {}", paths.base_dir().display());
            println!(
                "Ledger file:     {}",
                cli.file.unwrap_or_else(|| paths.ledger_file()).display()
            );
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Page size:         {}", settings.page_size);
            println!("  Breakdown limit:   {}", settings.breakdown_limit);
            println!("  Report categories: {}", settings.report_category_limit);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Week starts on:    {}", settings.week_start());
            println!("  Audit enabled:     {}", settings.audit_enabled);
        }
        Commands::Audit { limit } => handle_audit_command(&paths, limit)?,
        command => {
            let mut workspace = Workspace::open(paths, cli.file)?;
            match command {
                Commands::Transaction(cmd) => handle_transaction_command(&mut workspace, cmd)?,
                Commands::Report(cmd) => handle_report_command(&workspace, cmd)?,
                Commands::Export(args) => handle_export_command(&workspace, args)?,
                Commands::Import(args) => handle_import_command(&mut workspace, args)?,
                Commands::Clear { yes } => handle_clear_command(&mut workspace, yes)?,
                Commands::Config | Commands::Audit { .. } => {}
            }
            workspace.save()?;
        }
    }

    Ok(())
}
