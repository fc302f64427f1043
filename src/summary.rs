//! Aggregation of entry lists into KPI totals and chart series.
//!
//! Like the filtering functions, these are pure and total: invalid numeric
//! values contribute zero instead of failing.

use std::collections::HashMap;

use crate::entry::{Entry, EntryKind};

/// The label used to bucket entries whose category is empty or whitespace.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Aggregate income, expense, and balance over a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KpiTotals {
    /// Sum of amounts over income entries.
    pub income: f64,
    /// Sum of amounts over expense entries.
    pub expense: f64,
    /// `income - expense`.
    pub balance: f64,
}

/// Compute the KPI totals for `entries`.
///
/// Non-finite amounts are treated as zero.
pub fn compute_kpis(entries: &[Entry]) -> KpiTotals {
    let mut totals = KpiTotals::default();

    for entry in entries {
        let amount = if entry.amount.is_finite() {
            entry.amount
        } else {
            0.0
        };

        match entry.kind {
            EntryKind::Income => totals.income += amount,
            EntryKind::Expense => totals.expense += amount,
        }
    }

    totals.balance = totals.income - totals.expense;
    totals
}

/// Per-category income and expense sums, positionally aligned with a fixed
/// category order.
///
/// Index `i` of [CategorySeries::income] and [CategorySeries::expense] both
/// correspond to `categories[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    /// The category labels, in chart x-axis order.
    pub categories: Vec<String>,
    /// Income totals per category.
    pub income: Vec<f64>,
    /// Expense totals per category.
    pub expense: Vec<f64>,
}

/// Bucket `entries` by category and emit income/expense sums for each label
/// in `category_order`.
///
/// The grouping key is the trimmed category; empty categories fall into the
/// [UNCATEGORIZED_LABEL] bucket. Categories present in the data but missing
/// from `category_order` are dropped from the series. This is a known
/// display gap, not an error: the chart axis only shows registry labels.
pub fn compute_category_series(entries: &[Entry], category_order: &[&str]) -> CategorySeries {
    let mut totals_by_category: HashMap<&str, KpiTotals> = HashMap::new();

    for entry in entries {
        let key = match entry.category.trim() {
            "" => UNCATEGORIZED_LABEL,
            trimmed => trimmed,
        };
        let amount = if entry.amount.is_finite() {
            entry.amount
        } else {
            0.0
        };

        let totals = totals_by_category.entry(key).or_default();
        match entry.kind {
            EntryKind::Income => totals.income += amount,
            EntryKind::Expense => totals.expense += amount,
        }
    }

    let mut series = CategorySeries {
        categories: Vec::with_capacity(category_order.len()),
        income: Vec::with_capacity(category_order.len()),
        expense: Vec::with_capacity(category_order.len()),
    };

    for category in category_order {
        let totals = totals_by_category
            .get(category)
            .copied()
            .unwrap_or_default();

        series.categories.push((*category).to_owned());
        series.income.push(totals.income);
        series.expense.push(totals.expense);
    }

    series
}

#[cfg(test)]
mod summary_tests {
    use time::macros::date;

    use crate::entry::{Entry, EntryKind};

    use super::{UNCATEGORIZED_LABEL, compute_category_series, compute_kpis};

    fn entry(kind: EntryKind, category: &str, amount: f64) -> Entry {
        Entry::draft(kind, category, amount, date!(2024 - 01 - 15)).into_entry()
    }

    #[test]
    fn kpis_sum_by_kind() {
        let entries = vec![
            entry(EntryKind::Income, "Salary", 1000.0),
            entry(EntryKind::Expense, "Food", 200.0),
            entry(EntryKind::Expense, "Transport", 300.0),
        ];

        let totals = compute_kpis(&entries);

        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expense, 500.0);
        assert_eq!(totals.balance, 500.0);
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let entries = vec![
            entry(EntryKind::Income, "Salary", 123.45),
            entry(EntryKind::Expense, "Food", 543.21),
        ];

        let totals = compute_kpis(&entries);

        assert_eq!(totals.balance, totals.income - totals.expense);
    }

    #[test]
    fn kpis_treat_non_finite_amounts_as_zero() {
        let entries = vec![
            entry(EntryKind::Income, "Salary", f64::NAN),
            entry(EntryKind::Expense, "Food", f64::INFINITY),
            entry(EntryKind::Expense, "Food", 25.0),
        ];

        let totals = compute_kpis(&entries);

        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 25.0);
        assert_eq!(totals.balance, -25.0);
    }

    #[test]
    fn kpis_on_empty_list_are_zero() {
        let totals = compute_kpis(&[]);

        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.balance, 0.0);
    }

    #[test]
    fn series_is_aligned_with_category_order() {
        let entries = vec![
            entry(EntryKind::Expense, "Food", 50.0),
            entry(EntryKind::Expense, "Food", 25.0),
            entry(EntryKind::Income, "Salary", 1000.0),
        ];
        let order = ["Food", "Transport", "Salary"];

        let series = compute_category_series(&entries, &order);

        assert_eq!(series.categories, vec!["Food", "Transport", "Salary"]);
        assert_eq!(series.income, vec![0.0, 0.0, 1000.0]);
        assert_eq!(series.expense, vec![75.0, 0.0, 0.0]);
    }

    #[test]
    fn series_length_always_matches_category_order() {
        let entries = vec![entry(EntryKind::Expense, "Food", 50.0)];
        let order = ["Transport", "Housing"];

        let series = compute_category_series(&entries, &order);

        assert_eq!(series.categories.len(), order.len());
        assert_eq!(series.income.len(), order.len());
        assert_eq!(series.expense.len(), order.len());
    }

    #[test]
    fn categories_missing_from_order_are_dropped() {
        let entries = vec![
            entry(EntryKind::Expense, "Food", 50.0),
            entry(EntryKind::Expense, "Gadgets", 999.0),
        ];
        let order = ["Food"];

        let series = compute_category_series(&entries, &order);

        assert_eq!(series.categories, vec!["Food"]);
        assert_eq!(series.expense, vec![50.0]);
    }

    #[test]
    fn category_keys_are_trimmed_and_empty_is_uncategorized() {
        let entries = vec![
            entry(EntryKind::Expense, "  Food  ", 50.0),
            entry(EntryKind::Expense, "", 10.0),
            entry(EntryKind::Expense, "   ", 5.0),
        ];
        let order = ["Food", UNCATEGORIZED_LABEL];

        let series = compute_category_series(&entries, &order);

        assert_eq!(series.expense, vec![50.0, 15.0]);
    }
}
