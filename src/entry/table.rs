//! The entry table and its pagination controls.

use maud::{Markup, html};

use crate::{
    endpoints,
    entry::{Entry, EntryKind},
    html::{
        BADGE_EXPENSE_STYLE, BADGE_INCOME_STYLE, LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, edit_delete_action_links, format_currency, link,
    },
    pagination::Pager,
};

/// Renders the table for the current page of entries, or an empty state when
/// nothing matches the filters.
///
/// `filter_query` is the encoded filter portion of the query string, used to
/// keep the active filters when navigating between pages.
pub(super) fn entries_table(rows: &[Entry], pager: Pager, filter_query: &str) -> Markup {
    if rows.is_empty() {
        return empty_state_view();
    }

    html!(
        section class="w-full mx-auto mb-4 overflow-x-auto" {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                thead class=(TABLE_HEADER_STYLE) {
                    tr {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Note" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody {
                    @for entry in rows {
                        (entry_row(entry))
                    }
                }
            }

            (pagination_controls(pager, filter_query))
        }
    )
}

fn entry_row(entry: &Entry) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_ENTRY_VIEW, &entry.id);
    let delete_url = endpoints::format_endpoint(endpoints::ENTRY, &entry.id);

    let badge_style = match entry.kind {
        EntryKind::Income => BADGE_INCOME_STYLE,
        EntryKind::Expense => BADGE_EXPENSE_STYLE,
    };
    let badge_text = match entry.kind {
        EntryKind::Income => "Income",
        EntryKind::Expense => "Expense",
    };

    html!(
        tr class=(TABLE_ROW_STYLE) {
            td class=(TABLE_CELL_STYLE) { (entry.date) }

            td class=(TABLE_CELL_STYLE) {
                span class=(badge_style) { (badge_text) }
            }

            td class=(TABLE_CELL_STYLE) { (entry.category) }

            td class=(TABLE_CELL_STYLE) { (format_currency(entry.amount)) }

            td class=(TABLE_CELL_STYLE) {
                @if entry.note.is_empty() { "-" } @else { (entry.note) }
            }

            td class=(TABLE_CELL_STYLE) {
                div class="flex gap-4" {
                    (edit_delete_action_links(
                        &edit_url,
                        &delete_url,
                        "Delete this entry?",
                        "closest tr",
                        "outerHTML",
                    ))
                }
            }
        }
    )
}

fn pagination_controls(pager: Pager, filter_query: &str) -> Markup {
    let page_url = |page: u64| {
        if filter_query.is_empty() {
            format!("{}?page={page}", endpoints::LEDGER_VIEW)
        } else {
            format!("{}?{filter_query}&page={page}", endpoints::LEDGER_VIEW)
        }
    };

    html!(
        div class="flex justify-center items-center gap-4 mt-4 text-sm" {
            @if let Some(previous_page) = pager.previous_page() {
                a href=(page_url(previous_page)) class=(LINK_STYLE) { "Previous" }
            } @else {
                span class="text-gray-400" { "Previous" }
            }

            span class="text-gray-600 dark:text-gray-400" {
                "Page " (pager.current_page) " of " (pager.page_count)
            }

            @if let Some(next_page) = pager.next_page() {
                a href=(page_url(next_page)) class=(LINK_STYLE) { "Next" }
            } @else {
                span class="text-gray-400" { "Next" }
            }
        }
    )
}

fn empty_state_view() -> Markup {
    let new_entry_link = link(endpoints::NEW_ENTRY_VIEW, "record one");

    html!(
        section class="w-full mx-auto mb-4" {
            div class="flex flex-col items-center py-12 text-gray-600 dark:text-gray-400" {
                p class="text-lg" { "No entries match the current filters." }

                p {
                    "Widen the filters above, or " (new_entry_link) "."
                }
            }
        }
    )
}
