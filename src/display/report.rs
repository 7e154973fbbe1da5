//! Terminal formatting for statistics, category breakdowns and trends

use crate::models::Money;
use crate::services::{CategoryTotal, Stats, TrendSeries};

const BAR_WIDTH: usize = 24;

/// Format the headline statistics
pub fn format_stats(stats: &Stats, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Summary\n");
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!(
        "{:<18}{:>22}\n",
        "Total Income",
        stats.total_income.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<18}{:>22}\n",
        "Total Expenses",
        stats.total_expenses.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<18}{:>22}\n",
        "Net Balance",
        stats.net_balance.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<18}{:>22}\n",
        "Savings Rate",
        format!("{}%", stats.savings_rate)
    ));
    output.push_str(&format!("{:<18}{:>22}\n\n", "Transactions", stats.transaction_count));

    output.push_str(&format!(
        "This Month ({})\n",
        stats.current_month.month.long_label()
    ));
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!(
        "{:<18}{:>14} {:>7}\n",
        "Income",
        stats.current_month.income.format_with_symbol(symbol),
        format_change(stats.income_change_percent)
    ));
    output.push_str(&format!(
        "{:<18}{:>14} {:>7}\n",
        "Expenses",
        stats.current_month.expenses.format_with_symbol(symbol),
        format_change(stats.expense_change_percent)
    ));
    output.push_str(&format!(
        "{:<18}{:>14} {:>7}\n",
        "Savings",
        stats.current_month.savings.format_with_symbol(symbol),
        format_change(stats.balance_change_percent)
    ));

    output
}

/// Format category totals with their share of the listed total
pub fn format_breakdown(categories: &[CategoryTotal], symbol: &str) -> String {
    if categories.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let total: Money = categories.iter().map(|c| c.amount).sum();
    let max = categories
        .iter()
        .map(|c| c.amount.cents())
        .max()
        .unwrap_or(0) as f64;

    let mut output = String::new();
    for category in categories {
        output.push_str(&format!(
            "{:<16} {:>14} {:>6}  {}\n",
            truncate(&category.category, 16),
            category.amount.format_with_symbol(symbol),
            format_percentage(category.percent_of(total)),
            format_bar(category.amount.cents() as f64, max, BAR_WIDTH)
        ));
    }
    output
}

/// Format the twelve-month trend, one line per month
pub fn format_trend(trend: &TrendSeries, symbol: &str) -> String {
    let mut output = format!(
        "{:<8} {:>14} {:>14} {:>14}\n",
        "Month", "Income", "Expenses", "Net"
    );
    output.push_str(&separator(53));
    output.push('\n');

    for month in trend.iter() {
        output.push_str(&format!(
            "{:<8} {:>14} {:>14} {:>14}\n",
            month.month.short_label(),
            month.income.format_with_symbol(symbol),
            month.expenses.format_with_symbol(symbol),
            month.net().format_with_symbol(symbol)
        ));
    }

    output.push_str(&separator(53));
    output.push('\n');
    output.push_str(&format!(
        "{:<8} {:>14} {:>14} {:>14}\n",
        "Total",
        trend.total_income().format_with_symbol(symbol),
        trend.total_expenses().format_with_symbol(symbol),
        (trend.total_income() - trend.total_expenses()).format_with_symbol(symbol)
    ));
    output
}

/// Signed month-over-month change, e.g. "+12.5%"
pub fn format_change(pct: f64) -> String {
    format!("{:+.1}%", pct)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to at most `max_chars` characters, ending with "..." when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionType};
    use crate::services::analytics::{category_breakdown, compute_stats, monthly_trend};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(
                TransactionType::Income,
                date(2025, 3, 1),
                "Paycheck",
                "Salary",
                Money::from_cents(200_000),
            ),
            Transaction::new(
                TransactionType::Expense,
                date(2025, 3, 2),
                "Groceries",
                "Food",
                Money::from_cents(35_000),
            ),
            Transaction::new(
                TransactionType::Expense,
                date(2025, 3, 3),
                "Flight",
                "Travel",
                Money::from_cents(10_000),
            ),
        ]
    }

    #[test]
    fn test_format_stats() {
        let stats = compute_stats(&sample(), date(2025, 3, 12));
        let formatted = format_stats(&stats, "$");
        assert!(formatted.contains("$2,000.00"));
        assert!(formatted.contains("$1,550.00"));
        assert!(formatted.contains("78%"));
        assert!(formatted.contains("This Month (March 2025)"));
    }

    #[test]
    fn test_format_breakdown() {
        let formatted = format_breakdown(&category_breakdown(&sample()), "$");
        let lines: Vec<_> = formatted.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[0].contains("$350.00"));
        assert!(lines[0].contains("78%"));
        assert!(lines[1].starts_with("Travel"));

        assert_eq!(format_breakdown(&[], "$"), "No expenses recorded.\n");
    }

    #[test]
    fn test_format_trend() {
        let formatted = format_trend(&monthly_trend(&sample(), date(2025, 3, 12)), "$");
        // header, rule, 12 months, rule, total
        assert_eq!(formatted.lines().count(), 16);
        assert!(formatted.contains("Mar 25"));
        assert!(formatted.contains("Apr 24"));
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(12.345), "+12.3%");
        assert_eq!(format_change(-50.0), "-50.0%");
        assert_eq!(format_change(0.0), "+0.0%");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
        assert_eq!(truncate("Crème brûlée au café", 8), "Crème...");
    }
}
