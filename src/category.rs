//! The fixed registry of category labels offered for each entry kind.
//!
//! The filter dropdown and the category chart x-axis must agree on the same
//! ordering, so both read from [categories_for].

use crate::entry::EntryKind;

/// The categories offered for income entries, in display order.
pub const INCOME_CATEGORIES: [&str; 4] = ["Salary", "Bonus", "Investment", "Other income"];

/// The categories offered for expense entries, in display order.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Health",
    "Housing",
    "Education",
    "Other expenses",
];

/// The category labels to offer for `kind`.
///
/// When no kind is selected, returns all expense categories followed by all
/// income categories. Expense-first ordering is a fixed design choice shared
/// with the "all kinds" chart x-axis.
pub fn categories_for(kind: Option<EntryKind>) -> Vec<&'static str> {
    match kind {
        Some(EntryKind::Income) => INCOME_CATEGORIES.to_vec(),
        Some(EntryKind::Expense) => EXPENSE_CATEGORIES.to_vec(),
        None => EXPENSE_CATEGORIES
            .iter()
            .chain(INCOME_CATEGORIES.iter())
            .copied()
            .collect(),
    }
}

#[cfg(test)]
mod category_registry_tests {
    use std::collections::HashSet;

    use crate::entry::EntryKind;

    use super::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, categories_for};

    #[test]
    fn income_and_expense_lists_keep_registry_order() {
        assert_eq!(
            categories_for(Some(EntryKind::Income)),
            INCOME_CATEGORIES.to_vec()
        );
        assert_eq!(
            categories_for(Some(EntryKind::Expense)),
            EXPENSE_CATEGORIES.to_vec()
        );
    }

    #[test]
    fn all_kinds_is_expenses_then_income_with_no_duplicates_or_omissions() {
        let all = categories_for(None);

        let want: Vec<&str> = EXPENSE_CATEGORIES
            .iter()
            .chain(INCOME_CATEGORIES.iter())
            .copied()
            .collect();
        assert_eq!(all, want);

        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(
            unique.len(),
            EXPENSE_CATEGORIES.len() + INCOME_CATEGORIES.len()
        );
    }
}
