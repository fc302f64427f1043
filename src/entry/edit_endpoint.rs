//! Defines the endpoint for replacing an existing entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    entry::{Entry, EntryId, create_endpoint::EntryForm, create_endpoint::validate_entry_form},
    ledger::{Ledger, SqliteEntryStore},
};

/// The state needed to update an entry.
#[derive(Debug, Clone)]
pub struct EditEntryState {
    /// The working copy of the entry list.
    pub ledger: Arc<Mutex<Ledger<SqliteEntryStore>>>,
}

impl FromRef<AppState> for EditEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for replacing the entry with `entry_id`, redirects to the
/// ledger view on success.
///
/// Updates are full-record replaces; there is no partial-field patch.
pub async fn edit_entry_endpoint(
    State(state): State<EditEntryState>,
    Path(entry_id): Path<EntryId>,
    Form(form): Form<EntryForm>,
) -> Response {
    if let Err(response) = validate_entry_form(&form) {
        return response;
    }

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let replacement = Entry {
        id: entry_id,
        kind: form.kind,
        category: form.category,
        amount: form.amount,
        date: form.date,
        note: form.note,
    };

    match ledger.update(replacement) {
        Ok(()) => (
            HxRedirect(endpoints::LEDGER_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ Error::UpdateMissingEntry) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not update entry: {error}");
            error.into_alert_response()
        }
    }
}
