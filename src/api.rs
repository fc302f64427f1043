//! The JSON API for programmatic access to the ledger.
//!
//! Unlike the HTML endpoints, these handlers are a direct pass-through to the
//! database: each request runs one statement and reports the outcome. Writes
//! made here become visible to the ledger page on its next load.
//!
//! Request bodies deserialize with every field optional and are validated by
//! hand so a missing field produces a 400 JSON error envelope rather than an
//! extractor rejection.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    entry::{
        Entry, EntryId, EntryKind, delete_all_entries, delete_entry, get_all_entries,
        insert_entry, update_entry,
    },
    filter::FilterCriteria,
};

/// The state needed by the JSON API handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON error envelope: `{"error": ..., "details": ...}`.
#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_owned(),
            details: None,
        }
    }

    fn with_details(error: &str, details: String) -> Self {
        Self {
            error: error.to_owned(),
            details: Some(details),
        }
    }
}

fn error_response(status_code: StatusCode, error: ApiError) -> Response {
    (status_code, Json(error)).into_response()
}

fn missing_field_response(field: &str) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        ApiError::new(&format!("missing or invalid required field: {field}")),
    )
}

/// A request body for creating or replacing an entry.
///
/// Every field is optional at the serde level; [EntryPayload::into_entry]
/// performs the validation and reports the first missing field.
#[derive(Debug, Default, Deserialize)]
pub struct EntryPayload {
    /// The client-generated id. Required on create, ignored on update (the
    /// path parameter is the identity).
    #[serde(default)]
    pub id: Option<EntryId>,
    /// `"income"` or `"expense"`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// The category label.
    #[serde(default)]
    pub category: Option<String>,
    /// The amount, which must be greater than zero.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The entry date as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Optional note, defaulted to the empty string.
    #[serde(default)]
    pub note: Option<String>,
}

impl EntryPayload {
    /// Validate the payload and assemble an [Entry] with the given id.
    ///
    /// Returns the 400 response for the first missing or invalid field.
    fn into_entry(self, id: EntryId) -> Result<Entry, Response> {
        let kind = self
            .kind
            .as_deref()
            .and_then(EntryKind::parse)
            .ok_or_else(|| missing_field_response("type"))?;

        let category = self
            .category
            .filter(|category| !category.trim().is_empty())
            .ok_or_else(|| missing_field_response("category"))?;

        let amount = self
            .amount
            .filter(|amount| *amount > 0.0)
            .ok_or_else(|| missing_field_response("amount"))?;

        let date = self
            .date
            .as_deref()
            .and_then(FilterCriteria::parse_date)
            .ok_or_else(|| missing_field_response("date"))?;

        Ok(Entry {
            id,
            kind,
            category,
            amount,
            date,
            note: self.note.unwrap_or_default(),
        })
    }
}

/// Handler for `GET /api/details`.
///
/// Responds with all entries as a JSON array, ordered by date descending then
/// creation time descending, dates normalized to `YYYY-MM-DD`.
pub async fn list_details(State(state): State<ApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return database_lock_response();
        }
    };

    match get_all_entries(&connection) {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(error) => {
            tracing::error!("Could not list entries: {error}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("failed to query entries", error.to_string()),
            )
        }
    }
}

/// The response body for a successful create.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDetailResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The client-generated id the entry was stored under.
    pub id: EntryId,
    /// The database's internal row id, informational only.
    #[serde(rename = "insertId")]
    pub insert_id: i64,
}

/// Handler for `POST /api/details`.
///
/// Requires `id`, `type`, `category`, `amount`, and `date`; responds 201 with
/// the stored id and the internal insert id.
pub async fn create_detail(
    State(state): State<ApiState>,
    Json(payload): Json<EntryPayload>,
) -> Response {
    let Some(id) = payload.id.clone() else {
        return missing_field_response("id");
    };

    let entry = match payload.into_entry(id) {
        Ok(entry) => entry,
        Err(response) => return response,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return database_lock_response();
        }
    };

    match insert_entry(&entry, &connection) {
        Ok(insert_id) => (
            StatusCode::CREATED,
            Json(CreateDetailResponse {
                message: "entry created".to_owned(),
                id: entry.id,
                insert_id,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not create entry: {error}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("failed to create entry", error.to_string()),
            )
        }
    }
}

/// The response body for a successful update or single delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The id of the affected entry.
    pub id: EntryId,
}

/// Handler for `PUT /api/details/{id}`.
///
/// Full-record replace of the entry with the path id. Requires `type`,
/// `category`, `amount`, and `date`; responds 404 when the id is unknown.
pub async fn update_detail(
    State(state): State<ApiState>,
    Path(id): Path<EntryId>,
    Json(payload): Json<EntryPayload>,
) -> Response {
    let entry = match payload.into_entry(id) {
        Ok(entry) => entry,
        Err(response) => return response,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return database_lock_response();
        }
    };

    match update_entry(&entry, &connection) {
        Ok(()) => (
            StatusCode::OK,
            Json(DetailResponse {
                message: "entry updated".to_owned(),
                id: entry.id,
            }),
        )
            .into_response(),
        Err(Error::UpdateMissingEntry) => {
            error_response(StatusCode::NOT_FOUND, ApiError::new("entry not found"))
        }
        Err(error) => {
            tracing::error!("Could not update entry: {error}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("failed to update entry", error.to_string()),
            )
        }
    }
}

/// Handler for `DELETE /api/details/{id}`.
///
/// Responds 404 when the id is unknown, e.g. when a second delete races a
/// first one.
pub async fn delete_detail(State(state): State<ApiState>, Path(id): Path<EntryId>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return database_lock_response();
        }
    };

    match delete_entry(&id, &connection) {
        Ok(()) => (
            StatusCode::OK,
            Json(DetailResponse {
                message: "entry deleted".to_owned(),
                id,
            }),
        )
            .into_response(),
        Err(Error::DeleteMissingEntry) => {
            error_response(StatusCode::NOT_FOUND, ApiError::new("entry not found"))
        }
        Err(error) => {
            tracing::error!("Could not delete entry {id}: {error}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("failed to delete entry", error.to_string()),
            )
        }
    }
}

/// The response body for a successful bulk delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct WipeDetailsResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// How many entries were removed.
    #[serde(rename = "deletedCount")]
    pub deleted_count: usize,
}

/// Handler for `DELETE /api/details`.
///
/// Deletes every entry and reports how many rows were removed.
pub async fn wipe_details(State(state): State<ApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return database_lock_response();
        }
    };

    match delete_all_entries(&connection) {
        Ok(deleted_count) => (
            StatusCode::OK,
            Json(WipeDetailsResponse {
                message: "all entries deleted".to_owned(),
                deleted_count,
            }),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not wipe entries: {error}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("failed to delete entries", error.to_string()),
            )
        }
    }
}

fn database_lock_response() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiError::new("could not acquire the database lock"),
    )
}
