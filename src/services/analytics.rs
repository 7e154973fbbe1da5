//! Aggregation over the transaction store
//!
//! Summary statistics, category totals and the twelve-month trend. Every
//! function is a pure computation over a slice of transactions and a
//! reference date, so derived views are always recomputed from the store.

use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};

use crate::models::{MonthKey, Money, Period, Transaction};

/// Number of categories in the default breakdown
pub const BREAKDOWN_LIMIT: usize = 5;

/// Number of months in the trend series
pub const TREND_MONTHS: usize = 12;

/// Income, expenses and savings within one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub income: Money,
    pub expenses: Money,
    /// income minus expenses
    pub savings: Money,
}

/// Headline statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_balance: Money,
    /// Net balance as a whole percentage of income, 0 without income
    pub savings_rate: i64,
    pub current_month: MonthSummary,
    pub previous_month: MonthSummary,
    pub income_change_percent: f64,
    pub expense_change_percent: f64,
    pub balance_change_percent: f64,
    pub transaction_count: usize,
}

/// Summed expenses for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
    pub transaction_count: usize,
}

impl CategoryTotal {
    /// Share of `total` as a percentage
    pub fn percent_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            0.0
        } else {
            self.amount.cents() as f64 / total.cents() as f64 * 100.0
        }
    }
}

/// Income and expenses for one month of the trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub month: MonthKey,
    pub income: Money,
    pub expenses: Money,
}

impl MonthlyTotals {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Twelve consecutive months, oldest first, ending with the current month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendSeries {
    pub months: Vec<MonthlyTotals>,
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlyTotals> {
        self.months.iter()
    }

    /// Chart labels such as "Jan 25"
    pub fn labels(&self) -> Vec<String> {
        self.months.iter().map(|m| m.month.short_label()).collect()
    }

    pub fn total_income(&self) -> Money {
        self.months.iter().map(|m| m.income).sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.months.iter().map(|m| m.expenses).sum()
    }
}

/// Compute the headline statistics as of `today`
pub fn compute_stats(transactions: &[Transaction], today: NaiveDate) -> Stats {
    let (total_income, total_expenses) = totals(transactions.iter());
    let net_balance = total_income - total_expenses;

    let savings_rate = if total_income.is_zero() {
        0
    } else {
        round_half_up(net_balance.cents() as f64 / total_income.cents() as f64 * 100.0)
    };

    let this_month = MonthKey::of(today);
    let current_month = month_summary(transactions, this_month);
    let previous_month = month_summary(transactions, this_month.prev());

    Stats {
        total_income,
        total_expenses,
        net_balance,
        savings_rate,
        income_change_percent: change_percent(current_month.income, previous_month.income),
        expense_change_percent: change_percent(current_month.expenses, previous_month.expenses),
        balance_change_percent: change_percent(current_month.savings, previous_month.savings),
        current_month,
        previous_month,
        transaction_count: transactions.len(),
    }
}

/// Nearest integer with halves going toward positive infinity, so -0.5 is 0
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Percentage change from `previous` to `current`, measured against the
/// magnitude of `previous`. Zero when there is nothing to compare with.
fn change_percent(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    (current - previous).cents() as f64 / previous.abs().cents() as f64 * 100.0
}

/// Income, expenses and savings for a single calendar month
pub fn month_summary(transactions: &[Transaction], month: MonthKey) -> MonthSummary {
    let (income, expenses) = totals(transactions.iter().filter(|t| month.contains(t.date)));
    MonthSummary {
        month,
        income,
        expenses,
        savings: income - expenses,
    }
}

/// The five largest expense categories by total amount
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    top_expense_categories(transactions, BREAKDOWN_LIMIT)
}

/// The `limit` largest expense categories, descending by amount.
///
/// Equal totals keep the order in which their categories were first seen.
pub fn top_expense_categories(transactions: &[Transaction], limit: usize) -> Vec<CategoryTotal> {
    let mut totals = expense_totals(transactions.iter());
    totals.truncate(limit);
    totals
}

/// Every expense category within `period`, descending by amount
pub fn expense_distribution(
    transactions: &[Transaction],
    period: Period,
    today: NaiveDate,
    week_start: Weekday,
) -> Vec<CategoryTotal> {
    expense_totals(
        transactions
            .iter()
            .filter(|t| period.contains(t.date, today, week_start)),
    )
}

/// Income and expenses for each of the twelve months ending with `today`'s month
pub fn monthly_trend(transactions: &[Transaction], today: NaiveDate) -> TrendSeries {
    let last = MonthKey::of(today);
    let first = last.back(TREND_MONTHS as u32 - 1);

    let mut months: Vec<MonthlyTotals> = Vec::with_capacity(TREND_MONTHS);
    let mut month = first;
    for _ in 0..TREND_MONTHS {
        months.push(MonthlyTotals {
            month,
            income: Money::zero(),
            expenses: Money::zero(),
        });
        month = month.next();
    }

    let index: HashMap<MonthKey, usize> =
        months.iter().enumerate().map(|(i, m)| (m.month, i)).collect();

    for txn in transactions {
        if let Some(&i) = index.get(&MonthKey::of(txn.date)) {
            if txn.is_income() {
                months[i].income += txn.amount;
            } else {
                months[i].expenses += txn.amount;
            }
        }
    }

    TrendSeries { months }
}

/// Distinct category names in first-seen order
pub fn distinct_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = Vec::new();
    for txn in transactions {
        if !seen.contains(&txn.category) {
            seen.push(txn.category.clone());
        }
    }
    seen
}

fn totals<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> (Money, Money) {
    let mut income = Money::zero();
    let mut expenses = Money::zero();
    for txn in transactions {
        if txn.is_income() {
            income += txn.amount;
        } else {
            expenses += txn.amount;
        }
    }
    (income, expenses)
}

fn expense_totals<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Vec<CategoryTotal> {
    let mut order: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for txn in transactions.filter(|t| t.is_expense()) {
        match index.get(txn.category.as_str()) {
            Some(&i) => {
                order[i].amount += txn.amount;
                order[i].transaction_count += 1;
            }
            None => {
                index.insert(txn.category.as_str(), order.len());
                order.push(CategoryTotal {
                    category: txn.category.clone(),
                    amount: txn.amount,
                    transaction_count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal totals
    order.sort_by(|a, b| b.amount.cmp(&a.amount));
    order
}
