//! CSV export of transactions (spreadsheet-compatible)

use std::io::Write;

use crate::error::LedgerResult;
use crate::models::Transaction;

const HEADER: [&str; 9] = [
    "ID",
    "Type",
    "Date",
    "Description",
    "Category",
    "Amount",
    "Notes",
    "Created At",
    "Updated At",
];

/// Write every transaction as one CSV row, in the order given
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for txn in transactions {
        csv_writer.write_record([
            txn.id.full(),
            txn.kind.as_str().to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.description.clone(),
            txn.category.clone(),
            txn.amount.to_plain_string(),
            txn.notes.clone().unwrap_or_default(),
            txn.created_at.to_rfc3339(),
            txn.updated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Default CSV export file name
pub fn csv_file_name(date: chrono::NaiveDate) -> String {
    format!("expense-tracker-transactions-{}.csv", date.format("%Y-%m-%d"))
}
