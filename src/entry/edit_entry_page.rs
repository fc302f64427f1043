//! The page for editing an existing entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, Error, endpoints,
    entry::{
        Entry, EntryId,
        form::{EntryFormDefaults, entry_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, dollar_input_styles},
    ledger::{Ledger, SqliteEntryStore},
    navigation::NavBar,
};

/// The state needed for the edit entry page.
#[derive(Debug, Clone)]
pub struct EditEntryPageState {
    /// The working copy of the entry list.
    pub ledger: Arc<Mutex<Ledger<SqliteEntryStore>>>,
}

impl FromRef<AppState> for EditEntryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Render the page with the form for editing the entry with `entry_id`.
///
/// Returns the 404 page when the entry does not exist.
pub async fn get_edit_entry_page(
    State(state): State<EditEntryPageState>,
    Path(entry_id): Path<EntryId>,
) -> Result<Response, Error> {
    let mut ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    ledger.load()?;

    let entry = ledger.get(&entry_id).ok_or(Error::NotFound)?;

    Ok(edit_entry_view(entry).into_response())
}

fn edit_entry_view(entry: &Entry) -> maud::Markup {
    let nav_bar = NavBar::new(endpoints::LEDGER_VIEW).into_html();
    let submit_url = endpoints::format_endpoint(endpoints::ENTRY, &entry.id);

    let defaults = EntryFormDefaults {
        kind: entry.kind,
        category: Some(&entry.category),
        amount: Some(entry.amount),
        date: entry.date,
        note: (!entry.note.is_empty()).then_some(entry.note.as_str()),
    };

    let content = html!(
        (nav_bar)

        main class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit entry" }

            form
                class="space-y-4 w-full"
                hx-put=(submit_url)
                hx-target-error="#alert-container"
            {
                (entry_form_fields(&defaults))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save changes" }

                p class="text-center" {
                    a href=(endpoints::LEDGER_VIEW) class=(LINK_STYLE) { "Cancel" }
                }
            }
        }
    );

    base("Edit Entry", &[dollar_input_styles()], &content)
}
