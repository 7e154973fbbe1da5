//! Fixed category sets
//!
//! Income and expense transactions draw from separate, fixed category lists.
//! "Other" exists in both lists.

use super::transaction::TransactionType;

/// Categories available to income transactions, in display order
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Business",
    "Rental",
    "Bonus",
    "Refund",
    "Other",
];

/// Categories available to expense transactions, in display order
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Healthcare",
    "Bills",
    "Education",
    "Travel",
    "Insurance",
    "Maintenance",
    "Subscription",
    "Other",
];

/// Category list for a transaction type
pub fn categories_for(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

/// Exact, case-sensitive membership check
pub fn is_valid_category(kind: TransactionType, category: &str) -> bool {
    categories_for(kind).contains(&category)
}

/// Resolve user input to the canonical spelling of a category, ignoring case
pub fn canonical_category(kind: TransactionType, input: &str) -> Option<&'static str> {
    let input = input.trim();
    categories_for(kind)
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_are_distinct_per_type() {
        assert!(is_valid_category(TransactionType::Income, "Salary"));
        assert!(!is_valid_category(TransactionType::Expense, "Salary"));
        assert!(is_valid_category(TransactionType::Expense, "Food"));
        assert!(!is_valid_category(TransactionType::Income, "Food"));
        assert!(is_valid_category(TransactionType::Income, "Other"));
        assert!(is_valid_category(TransactionType::Expense, "Other"));
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        assert!(!is_valid_category(TransactionType::Expense, "food"));
    }

    #[test]
    fn test_canonical_category() {
        assert_eq!(
            canonical_category(TransactionType::Expense, " travel "),
            Some("Travel")
        );
        assert_eq!(canonical_category(TransactionType::Income, "travel"), None);
    }

    #[test]
    fn test_list_sizes() {
        assert_eq!(categories_for(TransactionType::Income).len(), 8);
        assert_eq!(categories_for(TransactionType::Expense).len(), 12);
    }
}
