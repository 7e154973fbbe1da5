//! YAML export of the ledger document, for human-readable backups

use std::io::Write;

use serde_json::Value;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::{parse_value, LedgerExport};
use crate::models::Transaction;

/// Write the document as YAML with a short header comment
pub fn export_yaml<W: Write>(export: &LedgerExport, writer: &mut W) -> LedgerResult<()> {
    let header = format!(
        "# Expense tracker ledger export\n# Generated: {}\n# Transactions: {}\n\n",
        export.export_date.to_rfc3339(),
        export.transactions.len()
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| LedgerError::Export(e.to_string()))
}

/// Parse a YAML ledger document, with the same rules as the JSON form
pub fn parse_yaml_document(text: &str) -> LedgerResult<Vec<Transaction>> {
    let value: Value = serde_yaml::from_str(text)
        .map_err(|e| LedgerError::Format(format!("not a YAML document: {}", e)))?;
    parse_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_yaml_export_and_parse() {
        let txns = vec![Transaction::new(
            TransactionType::Income,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            "Freelance gig",
            "Freelance",
            Money::from_cents(80_000),
        )];
        let export = LedgerExport::from_transactions(&txns, Utc::now());

        let mut output = Vec::new();
        export_yaml(&export, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Expense tracker ledger export"));
        assert!(text.contains("exportDate:"));
        assert!(text.contains("version: '1.0'"));

        let parsed = parse_yaml_document(&text).unwrap();
        assert_eq!(parsed, txns);
    }

    #[test]
    fn test_yaml_without_transactions_is_format_error() {
        let err = parse_yaml_document("version: '1.0'\n").unwrap_err();
        assert!(err.is_format());
    }
}
