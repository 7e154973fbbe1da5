//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::Transaction;
use crate::services::Page;

/// Options shared by the transaction formatters
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    /// strftime format for dates
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, options: &DisplayOptions) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format(&options.date_format).to_string(),
            kind: txn.kind.to_string(),
            description: truncate(&txn.description, 32),
            category: txn.category.clone(),
            amount: txn.signed_amount().format_with_symbol(&options.currency_symbol),
        }
    }
}

/// Format transactions as a table
pub fn format_transaction_table(transactions: &[&Transaction], options: &DisplayOptions) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow::new(t, options));
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(5)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format one page of a view: the table plus a position footer
pub fn format_page(page: &Page<'_>, options: &DisplayOptions) -> String {
    if page.items.is_empty() && page.total_items > 0 {
        return format!(
            "Page {} is past the end ({} pages).\n",
            page.page, page.total_pages
        );
    }

    let mut output = format_transaction_table(&page.items, options);
    if page.total_items > 0 {
        output.push_str(&format!(
            "Showing {}-{} of {} (page {} of {})\n",
            page.first_index(),
            page.first_index() + page.items.len() - 1,
            page.total_items,
            page.page,
            page.total_pages
        ));
    }
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Full ID:     {}\n", txn.id.full()));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.date.format(&options.date_format)
    ));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&options.currency_symbol)
    ));

    if let Some(notes) = &txn.notes {
        output.push_str(&format!("Notes:       {}\n", notes));
    }

    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(updated) = txn.updated_at {
        output.push_str(&format!(
            "Updated:     {}\n",
            updated.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}
