//! The page for recording a new entry.

use axum::response::{IntoResponse, Response};
use maud::html;
use time::{Date, OffsetDateTime};

use crate::{
    endpoints,
    entry::{
        EntryKind,
        form::{EntryFormDefaults, entry_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles},
    navigation::NavBar,
};

/// Today's date in the server's local timezone, falling back to UTC when the
/// local offset cannot be determined.
pub(super) fn today_local() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// Render the page with the form for recording a new entry.
pub async fn get_new_entry_page() -> Response {
    let nav_bar = NavBar::new(endpoints::NEW_ENTRY_VIEW).into_html();

    let defaults = EntryFormDefaults {
        kind: EntryKind::Expense,
        category: None,
        amount: None,
        date: today_local(),
        note: None,
    };

    let content = html!(
        (nav_bar)

        main class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "New entry" }

            form
                class="space-y-4 w-full"
                hx-post=(endpoints::ENTRIES)
                hx-target-error="#alert-container"
            {
                (entry_form_fields(&defaults))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add entry" }
            }
        }
    );

    base("New Entry", &[dollar_input_styles()], &content).into_response()
}

#[cfg(test)]
mod new_entry_page_tests {
    use axum::response::IntoResponse;
    use scraper::{Html, Selector};

    use super::get_new_entry_page;

    #[tokio::test]
    async fn form_posts_to_the_entries_endpoint() {
        let response = get_new_entry_page().await.into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");
        let html = Html::parse_document(&String::from_utf8_lossy(&body));

        let selector = Selector::parse("form[hx-post]").unwrap();
        let form = html.select(&selector).next().expect("expected a form");

        assert_eq!(form.value().attr("hx-post"), Some("/entries"));
    }

    #[tokio::test]
    async fn form_defaults_to_an_expense() {
        let response = get_new_entry_page().await.into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");
        let html = Html::parse_document(&String::from_utf8_lossy(&body));

        let selector = Selector::parse("input[type=radio][value=expense]").unwrap();
        let radio = html
            .select(&selector)
            .next()
            .expect("expected an expense radio input");

        assert!(radio.value().attr("checked").is_some());
    }
}
