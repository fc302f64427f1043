//! Defines the endpoint for deleting a single entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    AppState, Error,
    alert::{Alert, render},
    entry::EntryId,
    ledger::{Ledger, SqliteEntryStore},
};

/// The state needed to delete an entry.
#[derive(Debug, Clone)]
pub struct DeleteEntryState {
    /// The working copy of the entry list.
    pub ledger: Arc<Mutex<Ledger<SqliteEntryStore>>>,
}

impl FromRef<AppState> for DeleteEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for deleting an entry.
///
/// On success the response replaces the deleted table row with nothing.
/// Deleting an entry that is already gone, e.g. from a rapid double click,
/// is reported as a not-found alert and changes nothing.
pub async fn delete_entry_endpoint(
    State(state): State<DeleteEntryState>,
    Path(entry_id): Path<EntryId>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match ledger.remove(&entry_id) {
        // The status code has to be 200 OK or HTMX will not delete the table
        // row. The alert renders out-of-band, so the row itself is replaced
        // with nothing.
        Ok(()) => render(StatusCode::OK, Alert::success("Entry deleted", "")),
        Err(error @ Error::DeleteMissingEntry) => error.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete entry {entry_id}: {error}");
            error.into_alert_response()
        }
    }
}
