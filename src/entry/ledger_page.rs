//! Defines the route handler for the main ledger page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::categories_for,
    endpoints,
    entry::{
        Entry, EntryKind,
        cards::kpi_cards_view,
        charts::{LedgerChart, build_ledger_charts, charts_script, charts_view},
        table::entries_table,
    },
    filter::{FilterCriteria, apply_filters, sort_desc_by_date},
    html::{
        BUTTON_DANGER_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, LINK_STYLE, base,
    },
    ledger::{Ledger, SqliteEntryStore},
    navigation::NavBar,
    pagination::{Pager, PaginationConfig},
    summary::{KpiTotals, compute_category_series, compute_kpis},
};

/// The state needed for the ledger page.
#[derive(Debug, Clone)]
pub struct LedgerPageState {
    /// The working copy of the entry list.
    pub ledger: Arc<Mutex<Ledger<SqliteEntryStore>>>,
    /// The config that controls how the entry table is paged.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for LedgerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The raw query parameters for the ledger page.
///
/// All fields are optional; empty or malformed values mean "no constraint"
/// so that a hand-edited URL degrades to a wider view instead of an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerQuery {
    /// The entry kind to filter by, `income` or `expense`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// The earliest date to include, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: String,
    /// The latest date to include, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: String,
    /// The category text to filter by.
    #[serde(default)]
    pub category: String,
    /// The keyword to search notes and categories for.
    #[serde(default)]
    pub keyword: String,
    /// The page of the entry table to show.
    #[serde(default)]
    pub page: Option<u64>,
}

impl LedgerQuery {
    /// Build filter criteria from the raw parameters, dropping anything
    /// malformed.
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            kind: EntryKind::parse(self.kind.trim()),
            start_date: FilterCriteria::parse_date(&self.start_date),
            end_date: FilterCriteria::parse_date(&self.end_date),
            category: self.category.trim().to_owned(),
            keyword: self.keyword.trim().to_owned(),
        }
    }

    /// The filter portion of the query string, without the page number.
    ///
    /// Used to build page links that keep the active filters.
    pub fn filter_query_string(&self) -> String {
        let pairs: Vec<(&str, &str)> = [
            ("type", self.kind.as_str()),
            ("start_date", self.start_date.as_str()),
            ("end_date", self.end_date.as_str()),
            ("category", self.category.as_str()),
            ("keyword", self.keyword.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect();

        serde_urlencoded::to_string(pairs)
            .inspect_err(|error| tracing::error!("could not encode filter query: {error}"))
            .unwrap_or_default()
    }
}

/// Render the ledger: filter bar, KPI cards, charts, and the entry table.
///
/// Every page view reloads the working copy from the database first, so
/// changes made through the JSON API become visible here.
pub async fn get_ledger_page(
    State(state): State<LedgerPageState>,
    Query(query): Query<LedgerQuery>,
) -> Result<Response, Error> {
    let mut ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    ledger.load()?;

    let criteria = query.to_criteria();
    let mut visible = apply_filters(ledger.entries(), &criteria);
    sort_desc_by_date(&mut visible);

    let totals = compute_kpis(&visible);
    let series = compute_category_series(&visible, &categories_for(criteria.kind));
    let charts = build_ledger_charts(&totals, &series);

    let page_size = state.pagination_config.page_size;
    let requested_page = query.page.unwrap_or(state.pagination_config.default_page);
    let pager = Pager::new(requested_page, visible.len(), page_size);
    let rows = pager.slice(&visible, page_size);

    Ok(ledger_view(&query, &criteria, &totals, &charts, rows, pager).into_response())
}

fn ledger_view(
    query: &LedgerQuery,
    criteria: &FilterCriteria,
    totals: &KpiTotals,
    charts: &[LedgerChart],
    rows: &[Entry],
    pager: Pager,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::LEDGER_VIEW).into_html();
    let filter_query = query.filter_query_string();

    let content = html!(
        (nav_bar)

        main
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            header class="w-full flex justify-between flex-wrap items-end mb-4"
            {
                h1 class="text-xl font-bold" { "Ledger" }

                div class="flex gap-4 items-center"
                {
                    a href=(endpoints::NEW_ENTRY_VIEW) class=(LINK_STYLE) { "New entry" }

                    button
                        type="button"
                        class=(BUTTON_DANGER_STYLE)
                        hx-delete=(endpoints::ENTRIES)
                        hx-confirm="This permanently deletes every entry. Continue?"
                        hx-target-error="#alert-container"
                    {
                        "Clear all"
                    }
                }
            }

            (filter_bar(query, criteria))

            (kpi_cards_view(totals))

            (charts_view(charts))

            (entries_table(rows, pager, &filter_query))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts-5.6.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Ledger", &scripts, &content)
}

fn filter_bar(query: &LedgerQuery, criteria: &FilterCriteria) -> Markup {
    let category_options = categories_for(criteria.kind);

    html!(
        section class="w-full mx-auto mb-4"
        {
            form
                method="get"
                action=(endpoints::LEDGER_VIEW)
                class="flex flex-wrap gap-3 items-end bg-white dark:bg-gray-800 p-4 rounded-lg"
            {
                div
                {
                    label for="filter-type" class="block text-xs mb-1" { "Kind" }

                    select name="type" id="filter-type" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "All kinds" }
                        option value="income" selected[criteria.kind == Some(EntryKind::Income)] {
                            "Income"
                        }
                        option value="expense" selected[criteria.kind == Some(EntryKind::Expense)] {
                            "Expense"
                        }
                    }
                }

                div
                {
                    label for="filter-category" class="block text-xs mb-1" { "Category" }

                    select name="category" id="filter-category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "All categories" }

                        @for category in category_options {
                            option
                                value=(category)
                                selected[criteria.category == category]
                            {
                                (category)
                            }
                        }
                    }
                }

                div
                {
                    label for="filter-start-date" class="block text-xs mb-1" { "From" }

                    input
                        type="date"
                        name="start_date"
                        id="filter-start-date"
                        value=(query.start_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="filter-end-date" class="block text-xs mb-1" { "To" }

                    input
                        type="date"
                        name="end_date"
                        id="filter-end-date"
                        value=(query.end_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="filter-keyword" class="block text-xs mb-1" { "Keyword" }

                    input
                        type="text"
                        name="keyword"
                        id="filter-keyword"
                        placeholder="Note or category"
                        value=(query.keyword)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button
                    type="submit"
                    class="px-4 py-2 bg-blue-500 hover:bg-blue-600 text-white rounded"
                {
                    "Apply"
                }

                a href=(endpoints::LEDGER_VIEW) class=(LINK_STYLE) { "Reset" }
            }
        }
    )
}

#[cfg(test)]
mod ledger_page_tests {
    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        AppState,
        entry::{Entry, EntryKind, insert_entry},
    };

    use super::{LedgerPageState, LedgerQuery, get_ledger_page};

    async fn render_page(state: &AppState, query: LedgerQuery) -> Html {
        let response = get_ledger_page(State(LedgerPageState::from_app_state(state)), Query(query))
            .await
            .expect("handler returned an error");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");

        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    impl LedgerPageState {
        fn from_app_state(state: &AppState) -> Self {
            Self {
                ledger: state.ledger.clone(),
                pagination_config: state.pagination_config.clone(),
            }
        }
    }

    fn get_test_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        AppState::new(conn, Default::default()).expect("could not create app state")
    }

    fn seed_entries(state: &AppState) {
        let entries = [
            Entry::draft(EntryKind::Income, "Salary", 1000.0, date!(2024 - 01 - 01)).into_entry(),
            Entry::draft(EntryKind::Expense, "Food", 200.0, date!(2024 - 01 - 02)).into_entry(),
            Entry::draft(EntryKind::Expense, "Transport", 300.0, date!(2024 - 01 - 02))
                .into_entry(),
        ];

        let connection = state.db_connection.lock().unwrap();
        for entry in &entries {
            insert_entry(entry, &connection).expect("could not insert entry");
        }
    }

    #[tokio::test]
    async fn shows_all_entries_without_filters() {
        let state = get_test_state();
        seed_entries(&state);

        let html = render_page(&state, LedgerQuery::default()).await;
        let selector = Selector::parse("tbody tr").unwrap();

        assert_eq!(html.select(&selector).count(), 3);
    }

    #[tokio::test]
    async fn picks_up_entries_written_behind_the_working_copy() {
        let state = get_test_state();

        // The working copy was loaded before this entry existed; the page
        // reload must still show it.
        let entry =
            Entry::draft(EntryKind::Expense, "Food", 42.0, date!(2024 - 05 - 05)).into_entry();
        insert_entry(&entry, &state.db_connection.lock().unwrap())
            .expect("could not insert entry");

        let html = render_page(&state, LedgerQuery::default()).await;
        let selector = Selector::parse("tbody tr").unwrap();

        assert_eq!(html.select(&selector).count(), 1);
    }

    #[tokio::test]
    async fn kind_filter_narrows_rows_and_totals() {
        let state = get_test_state();
        seed_entries(&state);

        let query = LedgerQuery {
            kind: "expense".to_owned(),
            ..Default::default()
        };
        let html = render_page(&state, query).await;

        let row_selector = Selector::parse("tbody tr").unwrap();
        assert_eq!(html.select(&row_selector).count(), 2);

        // Income total of the filtered view is zero.
        let markup = html.root_element().html();
        assert!(markup.contains("$0.00"));
        assert!(markup.contains("$500.00"));
    }

    #[tokio::test]
    async fn malformed_dates_degrade_to_no_constraint() {
        let state = get_test_state();
        seed_entries(&state);

        let query = LedgerQuery {
            start_date: "not-a-date".to_owned(),
            ..Default::default()
        };
        let html = render_page(&state, query).await;
        let selector = Selector::parse("tbody tr").unwrap();

        assert_eq!(html.select(&selector).count(), 3);
    }

    #[test]
    fn filter_query_string_skips_empty_fields() {
        let query = LedgerQuery {
            kind: "expense".to_owned(),
            keyword: "coffee beans".to_owned(),
            ..Default::default()
        };

        assert_eq!(query.filter_query_string(), "type=expense&keyword=coffee+beans");
    }
}
