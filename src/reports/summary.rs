//! Ledger summary report
//!
//! Collects the headline statistics, the largest expense categories and the
//! twelve-month breakdown, and renders them as a fixed plain-text layout.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::LedgerResult;
use crate::models::Transaction;
use crate::services::analytics::{
    compute_stats, monthly_trend, top_expense_categories, CategoryTotal, MonthlyTotals, Stats,
};

/// Categories listed in the report by default
pub const REPORT_CATEGORY_LIMIT: usize = 10;

/// Summary report over the whole ledger
#[derive(Debug, Clone)]
pub struct LedgerReport {
    pub generated_at: DateTime<Utc>,
    pub stats: Stats,
    pub top_categories: Vec<CategoryTotal>,
    /// Oldest first, ending with the current month
    pub monthly_breakdown: Vec<MonthlyTotals>,
}

impl LedgerReport {
    /// Generate the report as of `today`
    pub fn generate(
        transactions: &[Transaction],
        today: NaiveDate,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self::generate_with_limit(transactions, today, generated_at, REPORT_CATEGORY_LIMIT)
    }

    /// Generate the report listing at most `category_limit` categories
    pub fn generate_with_limit(
        transactions: &[Transaction],
        today: NaiveDate,
        generated_at: DateTime<Utc>,
        category_limit: usize,
    ) -> Self {
        Self {
            generated_at,
            stats: compute_stats(transactions, today),
            top_categories: top_expense_categories(transactions, category_limit),
            monthly_breakdown: monthly_trend(transactions, today).months,
        }
    }

    /// Render the plain-text report
    pub fn format_text(&self) -> String {
        let mut output = String::new();

        output.push_str("EXPENSE TRACKER REPORT\n");
        output.push_str(&format!(
            "Generated on: {}\n",
            self.generated_at.format("%-m/%-d/%Y")
        ));
        output.push_str(&"=".repeat(50));
        output.push_str("\n\n");

        output.push_str("SUMMARY\n");
        output.push_str(&"=".repeat(20));
        output.push('\n');
        output.push_str(&format!(
            "Total Income: {}\n",
            self.stats.total_income.to_plain_string()
        ));
        output.push_str(&format!(
            "Total Expenses: {}\n",
            self.stats.total_expenses.to_plain_string()
        ));
        output.push_str(&format!(
            "Net Balance: {}\n",
            self.stats.net_balance.to_plain_string()
        ));
        output.push_str(&format!("Savings Rate: {}%\n\n", self.stats.savings_rate));

        output.push_str("TOP EXPENSE CATEGORIES\n");
        output.push_str(&"=".repeat(30));
        output.push('\n');
        for (index, category) in self.top_categories.iter().enumerate() {
            output.push_str(&format!(
                "{}. {}: {}\n",
                index + 1,
                category.category,
                category.amount.to_plain_string()
            ));
        }

        output.push_str("\nMONTHLY BREAKDOWN\n");
        output.push_str(&"=".repeat(25));
        output.push('\n');
        for month in &self.monthly_breakdown {
            output.push_str(&format!(
                "{}: Income {}, Expenses {}, Net {}\n",
                month.month.long_label(),
                month.income.to_plain_string(),
                month.expenses.to_plain_string(),
                month.net().to_plain_string()
            ));
        }

        output
    }

    /// Export the monthly breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Month", "Income", "Expenses", "Net"])?;

        for month in &self.monthly_breakdown {
            csv_writer.write_record([
                month.month.to_string(),
                month.income.to_plain_string(),
                month.expenses.to_plain_string(),
                month.net().to_plain_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Default report file name, e.g. `expense-report-2025-01-15.txt`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("expense-report-{}.txt", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(
                TransactionType::Income,
                date(2025, 1, 2),
                "Paycheck",
                "Salary",
                Money::from_cents(100_000),
            ),
            Transaction::new(
                TransactionType::Expense,
                date(2025, 1, 5),
                "Groceries",
                "Food",
                Money::from_cents(35_000),
            ),
            Transaction::new(
                TransactionType::Expense,
                date(2024, 12, 20),
                "Train",
                "Travel",
                Money::from_cents(10_000),
            ),
        ]
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_generate() {
        let report = LedgerReport::generate(&sample(), date(2025, 1, 15), generated_at());

        assert_eq!(report.stats.net_balance.cents(), 55_000);
        assert_eq!(report.top_categories.len(), 2);
        assert_eq!(report.top_categories[0].category, "Food");
        assert_eq!(report.monthly_breakdown.len(), 12);
    }

    #[test]
    fn test_format_text_layout() {
        let report = LedgerReport::generate(&sample(), date(2025, 1, 15), generated_at());
        let text = report.format_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "EXPENSE TRACKER REPORT");
        assert_eq!(lines[1], "Generated on: 1/15/2025");
        assert_eq!(lines[2], "=".repeat(50));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "SUMMARY");
        assert_eq!(lines[5], "=".repeat(20));
        assert_eq!(lines[6], "Total Income: 1000.00");
        assert_eq!(lines[7], "Total Expenses: 450.00");
        assert_eq!(lines[8], "Net Balance: 550.00");
        assert_eq!(lines[9], "Savings Rate: 55%");
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], "TOP EXPENSE CATEGORIES");
        assert_eq!(lines[12], "=".repeat(30));
        assert_eq!(lines[13], "1. Food: 350.00");
        assert_eq!(lines[14], "2. Travel: 100.00");
        assert_eq!(lines[15], "");
        assert_eq!(lines[16], "MONTHLY BREAKDOWN");
        assert_eq!(lines[17], "=".repeat(25));
        assert_eq!(
            lines[18],
            "February 2024: Income 0.00, Expenses 0.00, Net 0.00"
        );
        assert_eq!(
            lines[28],
            "December 2024: Income 0.00, Expenses 100.00, Net -100.00"
        );
        assert_eq!(
            lines[29],
            "January 2025: Income 1000.00, Expenses 350.00, Net 650.00"
        );
        assert_eq!(lines.len(), 30);
    }

    #[test]
    fn test_empty_ledger_report() {
        let report = LedgerReport::generate(&[], date(2025, 1, 15), generated_at());
        let text = report.format_text();
        assert!(text.contains("Savings Rate: 0%"));
        assert!(text.contains("TOP EXPENSE CATEGORIES\n==============================\n\nMONTHLY BREAKDOWN"));
    }

    #[test]
    fn test_category_limit() {
        let report =
            LedgerReport::generate_with_limit(&sample(), date(2025, 1, 15), generated_at(), 1);
        assert_eq!(report.top_categories.len(), 1);
    }

    #[test]
    fn test_export_csv() {
        let report = LedgerReport::generate(&sample(), date(2025, 1, 15), generated_at());
        let mut output = Vec::new();
        report.export_csv(&mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("Month,Income,Expenses,Net\n"));
        assert!(text.contains("2025-01,1000.00,350.00,650.00"));
        assert_eq!(text.lines().count(), 13);
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(date(2025, 1, 15)), "expense-report-2025-01-15.txt");
    }
}
