//! Filtering and sorting of the in-memory entry list.
//!
//! These functions are the read side of the ledger: they take the working
//! copy and the current filter criteria and produce the filtered view the
//! page renders. They are pure, never fail, and treat empty or malformed
//! criteria fields as "no constraint".

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::entry::{Entry, EntryKind};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The five-field query controlling which entries are visible.
///
/// Every field is optional; the default criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Only match entries of this kind.
    pub kind: Option<EntryKind>,
    /// Only match entries dated on or after this date.
    pub start_date: Option<Date>,
    /// Only match entries dated on or before this date.
    pub end_date: Option<Date>,
    /// Only match entries whose category contains this text,
    /// case-insensitively. Empty means no constraint.
    pub category: String,
    /// Only match entries whose note or category contains this text,
    /// case-insensitively. Empty means no constraint.
    pub keyword: String,
}

impl FilterCriteria {
    /// Leniently parse a `YYYY-MM-DD` date field.
    ///
    /// Malformed values become `None` rather than an error so that a bad
    /// query string degrades to an unfiltered view.
    pub fn parse_date(raw: &str) -> Option<Date> {
        Date::parse(raw.trim(), DATE_FORMAT).ok()
    }

    fn matches(&self, entry: &Entry) -> bool {
        if let Some(kind) = self.kind
            && entry.kind != kind
        {
            return false;
        }

        if let Some(start_date) = self.start_date
            && entry.date < start_date
        {
            return false;
        }

        if let Some(end_date) = self.end_date
            && entry.date > end_date
        {
            return false;
        }

        if !self.category.is_empty()
            && !contains_ignore_case(&entry.category, &self.category)
        {
            return false;
        }

        if !self.keyword.is_empty()
            && !contains_ignore_case(&entry.note, &self.keyword)
            && !contains_ignore_case(&entry.category, &self.keyword)
        {
            return false;
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Return the entries that match every constraint in `criteria`.
///
/// The output preserves the input order; callers that need a particular
/// display order re-sort with [sort_desc_by_date].
pub fn apply_filters(entries: &[Entry], criteria: &FilterCriteria) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| criteria.matches(entry))
        .cloned()
        .collect()
}

/// Sort entries newest-date first.
///
/// The sort is stable, so entries sharing a date keep their relative order
/// from the previous stage. Given the load order from the store (creation
/// time descending within a date) this reproduces the read endpoint's
/// ordering.
pub fn sort_desc_by_date(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}
