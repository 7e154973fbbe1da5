//! Change summaries for edited transactions

use crate::models::Transaction;

const MAX_TEXT_CHARS: usize = 50;

/// Describe what an edit changed, e.g.
/// `amount: 5.0 -> 7.5, description: "Lunch" -> "Team lunch"`.
///
/// Only the editable fields are compared. Returns `None` when none of them
/// changed.
pub fn transaction_changes(before: &Transaction, after: &Transaction) -> Option<String> {
    let mut changes = Vec::new();

    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }
    if before.description != after.description {
        changes.push(format!(
            "description: {} -> {}",
            quoted(&before.description),
            quoted(&after.description)
        ));
    }
    if before.category != after.category {
        changes.push(format!(
            "category: {} -> {}",
            quoted(&before.category),
            quoted(&after.category)
        ));
    }
    if before.amount != after.amount {
        changes.push(format!(
            "amount: {:?} -> {:?}",
            before.amount.as_f64(),
            after.amount.as_f64()
        ));
    }
    if before.notes != after.notes {
        changes.push(format!(
            "notes: {} -> {}",
            optional(before.notes.as_deref()),
            optional(after.notes.as_deref())
        ));
    }

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn optional(text: Option<&str>) -> String {
    text.map_or_else(|| "(none)".to_string(), quoted)
}

fn quoted(text: &str) -> String {
    if text.chars().count() > MAX_TEXT_CHARS {
        let head: String = text.chars().take(MAX_TEXT_CHARS - 3).collect();
        format!("\"{}...\"", head)
    } else {
        format!("\"{}\"", text)
    }
}
