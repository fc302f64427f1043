//! Defines the endpoint for wiping every entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error, endpoints,
    ledger::{Ledger, SqliteEntryStore},
};

/// The state needed to wipe the ledger.
#[derive(Debug, Clone)]
pub struct WipeEntriesState {
    /// The working copy of the entry list.
    pub ledger: Arc<Mutex<Ledger<SqliteEntryStore>>>,
}

impl FromRef<AppState> for WipeEntriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler that deletes every entry, then redirects to the empty
/// ledger view.
///
/// The confirmation prompt lives on the button (`hx-confirm`), so by the time
/// this handler runs the user has already agreed.
pub async fn wipe_entries_endpoint(State(state): State<WipeEntriesState>) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match ledger.wipe_all() {
        Ok(deleted) => {
            tracing::info!("Wiped {deleted} entries");
            (
                HxRedirect(endpoints::LEDGER_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not wipe entries: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, response::IntoResponse};
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState,
        entry::{Entry, EntryKind, get_all_entries, insert_entry},
    };

    use super::{WipeEntriesState, wipe_entries_endpoint};

    #[tokio::test]
    async fn wipes_every_entry_and_redirects() {
        let conn = Connection::open_in_memory().unwrap();
        let app_state = AppState::new(conn, Default::default()).unwrap();
        let state = WipeEntriesState {
            ledger: app_state.ledger.clone(),
        };

        {
            let connection = app_state.db_connection.lock().unwrap();
            for i in 1..=3 {
                let entry =
                    Entry::draft(EntryKind::Expense, "Food", i as f64, date!(2024 - 01 - 02))
                        .into_entry();
                insert_entry(&entry, &connection).expect("could not insert entry");
            }
        }
        app_state.ledger.lock().unwrap().load().unwrap();

        let response = wipe_entries_endpoint(State(state)).await.into_response();

        assert_eq!(
            response
                .headers()
                .get(HX_REDIRECT)
                .expect("expected an hx-redirect header"),
            "/ledger"
        );
        assert_eq!(
            get_all_entries(&app_state.db_connection.lock().unwrap()),
            Ok(vec![])
        );
        assert!(app_state.ledger.lock().unwrap().entries().is_empty());
    }
}
