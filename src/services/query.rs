//! Query engine
//!
//! Filtered, searched and period-bounded views over the store, always sorted
//! newest first, plus pagination of those views.

use chrono::{NaiveDate, Weekday};

use crate::models::{Period, Transaction, TransactionType};

/// Options for filtering transactions. All set criteria must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive substring of description, category or notes
    pub search: Option<String>,
    /// Exact transaction type
    pub kind: Option<TransactionType>,
    /// Exact category name
    pub category: Option<String>,
    /// Lower date bound relative to today
    pub period: Period,
    /// First day of the week for `Period::Week`
    pub week_start: Weekday,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            search: None,
            kind: None,
            category: None,
            period: Period::All,
            week_start: Weekday::Sun,
        }
    }
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Search text. Blank text clears the search.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.period == Period::All
    }
}

/// Transactions matching `filter`, sorted by date descending.
///
/// The sort is stable, so transactions on the same day keep store order.
pub fn filtered_view<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
    today: NaiveDate,
) -> Vec<&'a Transaction> {
    let needle = filter.search.as_deref().map(|s| s.trim().to_lowercase());
    let start = filter.period.start_date(today, filter.week_start);

    let mut view: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| needle.as_deref().map_or(true, |n| t.matches_search(n)))
        .filter(|t| filter.kind.map_or(true, |k| t.kind == k))
        .filter(|t| filter.category.as_deref().map_or(true, |c| t.category == c))
        .filter(|t| start.map_or(true, |s| t.date >= s))
        .collect();

    view.sort_by(|a, b| b.date.cmp(&a.date));
    view
}

/// One page of a view
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Transaction>,
    /// 1-based page number actually served
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Page<'_> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first item on this page, 0 when empty
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }
}

/// Slice `view` into the requested page.
///
/// Pages below 1 are served as page 1 and a page size of 0 is treated as 1.
/// A page past the end is empty while `total_pages` stays accurate.
pub fn paginate<'a>(view: &[&'a Transaction], page: usize, page_size: usize) -> Page<'a> {
    let page = change_page(page);
    let page_size = page_size.max(1);
    let total_items = view.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let items = view
        .iter()
        .skip(start)
        .take(page_size)
        .copied()
        .collect();

    Page {
        items,
        page,
        page_size,
        total_pages,
        total_items,
    }
}

/// Page navigation: requests below 1 stay on page 1
pub fn change_page(requested: usize) -> usize {
    requested.max(1)
}
