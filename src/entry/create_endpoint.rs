//! Defines the endpoint for creating a new entry.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, alert::Alert, alert::render, endpoints,
    entry::{Entry, EntryKind},
    ledger::{Ledger, SqliteEntryStore},
};

/// The state needed to create an entry.
#[derive(Debug, Clone)]
pub struct CreateEntryState {
    /// The working copy of the entry list.
    pub ledger: Arc<Mutex<Ledger<SqliteEntryStore>>>,
}

impl FromRef<AppState> for CreateEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The form data for creating an entry.
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    /// Whether the entry is income or an expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// The category label for the entry.
    pub category: String,
    /// The value of the entry in dollars.
    pub amount: f64,
    /// The date when the entry occurred.
    pub date: Date,
    /// Optional free-text note.
    #[serde(default)]
    pub note: String,
}

/// Validate form fields that the browser's own validation cannot be trusted
/// with, returning an alert response on failure.
pub(super) fn validate_entry_form(form: &EntryForm) -> Result<(), Response> {
    if !(form.amount > 0.0) {
        return Err(Error::InvalidAmount(form.amount).into_alert_response());
    }

    if form.category.trim().is_empty() {
        return Err(render(
            StatusCode::BAD_REQUEST,
            Alert::error("Missing category", "Select a category for the entry."),
        ));
    }

    Ok(())
}

/// A route handler for creating a new entry, redirects to the ledger view on
/// success.
///
/// The working copy is only mutated once the database insert succeeds, so a
/// failure leaves the ledger exactly as it was.
pub async fn create_entry_endpoint(
    State(state): State<CreateEntryState>,
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

    let draft = Entry::draft(form.kind, &form.category, form.amount, form.date).note(&form.note);

    match ledger.add(draft) {
        Ok(_) => (
            HxRedirect(endpoints::LEDGER_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not create entry: {error}");
            error.into_alert_response()
        }
    }
}
