//! Transaction CLI commands
//!
//! Implements adding, editing, deleting, showing and listing transactions.

use clap::Subcommand;

use super::Workspace;
use crate::display::transaction::{format_page, format_transaction_details};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Period, TransactionType};
use crate::services::{TransactionFilter, TransactionInput};

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// income or expense
        #[arg(value_parser = parse_kind)]
        kind: TransactionType,
        /// Amount in currency units (e.g. 12.50 or "$1,250.00")
        #[arg(allow_hyphen_values = true, value_parser = parse_amount)]
        amount: f64,
        /// Description (3-100 characters)
        description: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (or a unique prefix)
        id: String,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true, value_parser = parse_amount)]
        amount: Option<f64>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes (empty to remove)
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (or a unique prefix)
        id: String,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (or a unique prefix)
        id: String,
    },
    /// List transactions, newest first
    List {
        /// Case-insensitive text in description, category or notes
        #[arg(short, long)]
        search: Option<String>,
        /// Only income or only expense
        #[arg(short = 't', long = "type", value_parser = parse_kind)]
        kind: Option<TransactionType>,
        /// Exact category name
        #[arg(short, long)]
        category: Option<String>,
        /// today, week, month, quarter, year or all
        #[arg(short, long, default_value = "all")]
        period: Period,
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
    },
}

/// Plain numbers keep full precision for the validator to round; currency
/// formatted input ("$1,250.00") goes through `Money::parse`.
fn parse_amount(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .or_else(|_| Money::parse(s).map(|m| m.as_f64()))
        .map_err(|e| e.to_string())
}

pub(crate) fn parse_kind(s: &str) -> Result<TransactionType, String> {
    TransactionType::parse(s).ok_or_else(|| format!("'{}' is not income or expense", s))
}

/// Handle a transaction command
pub fn handle_transaction_command(
    workspace: &mut Workspace,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    let today = Workspace::today();
    let options = workspace.display_options();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            description,
            category,
            date,
            notes,
        } => {
            let date = date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
            let mut input = TransactionInput::new(date, description, category, amount);
            input.notes = notes;

            let txn = workspace.ledger.add(kind, &input, today)?;

            println!("Created transaction:");
            println!("  ID:       {}", txn.id);
            println!("  Type:     {}", txn.kind);
            println!("  Date:     {}", txn.date.format(&options.date_format));
            println!(
                "  Amount:   {}",
                txn.amount.format_with_symbol(&options.currency_symbol)
            );
            println!("  Category: {}", txn.category);
        }

        TransactionCommands::Edit {
            id,
            amount,
            description,
            category,
            date,
            notes,
        } => {
            let txn = workspace.ledger.find_by_prefix(&id)?;
            let txn_id = txn.id;
            let mut input = TransactionInput::from_fields(&txn.fields());

            if amount.is_none()
                && description.is_none()
                && category.is_none()
                && date.is_none()
                && notes.is_none()
            {
                return Err(LedgerError::Validation(
                    "Nothing to change; pass at least one of --amount, --description, --category, --date, --notes".into(),
                ));
            }

            if let Some(amount) = amount {
                input.amount = amount;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if let Some(category) = category {
                input.category = category;
            }
            if let Some(date) = date {
                input.date = date;
            }
            if notes.is_some() {
                input.notes = notes;
            }

            let txn = workspace.ledger.update(txn_id, &input, today)?;
            println!("Updated transaction {}", txn.id);
        }

        TransactionCommands::Delete { id } => {
            let txn_id = workspace.ledger.find_by_prefix(&id)?.id;
            let removed = workspace.ledger.delete(txn_id)?;
            println!(
                "Deleted transaction {} ({})",
                removed.id, removed.description
            );
        }

        TransactionCommands::Show { id } => {
            let txn = workspace.ledger.find_by_prefix(&id)?;
            print!("{}", format_transaction_details(txn, &options));
        }

        TransactionCommands::List {
            search,
            kind,
            category,
            period,
            page,
            page_size,
        } => {
            let mut filter = TransactionFilter::new()
                .period(period)
                .week_start(workspace.settings.week_start());
            if let Some(search) = search {
                filter = filter.search(search);
            }
            if let Some(kind) = kind {
                filter = filter.kind(kind);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }

            let page_size = page_size.unwrap_or(workspace.settings.page_size);
            let page = workspace.ledger.page(&filter, today, page, page_size);
            print!("{}", format_page(&page, &options));
        }
    }

    Ok(())
}
