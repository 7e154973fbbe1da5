//! CLI commands for statistics and reports

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use super::transaction::parse_kind;
use super::Workspace;
use crate::display::report::{format_breakdown, format_stats, format_trend};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{categories_for, Period, TransactionType};
use crate::reports::{report_file_name, LedgerReport};

/// Statistics and report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals, savings rate and month-over-month changes
    Stats,

    /// Expense totals by category
    Breakdown {
        /// Restrict to today, week, month, quarter or year
        #[arg(short, long, default_value = "all")]
        period: Period,

        /// List every category instead of the largest few
        #[arg(long)]
        all: bool,
    },

    /// Income and expenses for the last twelve months
    Trend,

    /// Category names
    Categories {
        /// Show the allowed categories for income or expense
        #[arg(short = 't', long = "type", value_parser = parse_kind)]
        kind: Option<TransactionType>,
    },

    /// Generate the summary report
    Report {
        /// Write to a file instead of stdout (a .csv extension writes the monthly breakdown)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write to a dated file in the reports directory
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },
}

/// Handle a statistics or report command
pub fn handle_report_command(workspace: &Workspace, cmd: ReportCommands) -> LedgerResult<()> {
    let today = Workspace::today();
    let symbol = workspace.settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Stats => {
            print!("{}", format_stats(&workspace.ledger.stats(today), symbol));
        }

        ReportCommands::Breakdown { period, all } => {
            let mut categories = workspace.ledger.expense_distribution(
                period,
                today,
                workspace.settings.week_start(),
            );
            if !all {
                categories.truncate(workspace.settings.breakdown_limit);
            }
            print!("{}", format_breakdown(&categories, symbol));
        }

        ReportCommands::Trend => {
            print!("{}", format_trend(&workspace.ledger.trend(today), symbol));
        }

        ReportCommands::Categories { kind } => match kind {
            Some(kind) => {
                for name in categories_for(kind) {
                    println!("{}", name);
                }
            }
            None => {
                let used = workspace.ledger.categories();
                if used.is_empty() {
                    println!("No categories in use.");
                }
                for name in used {
                    println!("{}", name);
                }
            }
        },

        ReportCommands::Report { output, save } => {
            let report = LedgerReport::generate_with_limit(
                workspace.ledger.transactions(),
                today,
                chrono::Utc::now(),
                workspace.settings.report_category_limit,
            );

            let output = match output {
                Some(path) => Some(path),
                None if save => {
                    workspace.paths.ensure_directories()?;
                    Some(workspace.paths.reports_dir().join(report_file_name(today)))
                }
                None => None,
            };

            match output {
                None => print!("{}", report.format_text()),
                Some(path) => {
                    let is_csv = path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

                    if is_csv {
                        let file = File::create(&path).map_err(|e| {
                            LedgerError::Export(format!(
                                "Failed to create file {}: {}",
                                path.display(),
                                e
                            ))
                        })?;
                        report.export_csv(BufWriter::new(file))?;
                    } else {
                        crate::storage::write_text_atomic(&path, &report.format_text())?;
                    }
                    println!("Report written to: {}", path.display());
                }
            }
        }
    }

    Ok(())
}
