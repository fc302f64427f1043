//! Tallybook is a self-hosted web app for keeping a personal ledger of
//! income and expense entries.
//!
//! The library provides an HTTP server that renders the ledger UI as HTML
//! and exposes a small JSON API for programmatic access to the same data.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod category;
mod db;
mod endpoints;
mod entry;
mod filter;
mod html;
mod internal_server_error;
mod ledger;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod routing;
mod summary;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use entry::{Entry, EntryDraft, EntryId, EntryKind, get_entry, insert_entry};
pub use logging::logging_middleware;
pub use pagination::PaginationConfig;
pub use routing::build_router;

use crate::{
    alert::{Alert, render},
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An entry was submitted with an amount that is not greater than zero.
    #[error("{0} is not a valid amount, amounts must be greater than zero")]
    InvalidAmount(f64),

    /// An entry was created with a client id that already exists in the
    /// database. Ids are generated from a UUID, so this indicates a replayed
    /// create request rather than a collision.
    #[error("an entry with the id \"{0}\" already exists in the database")]
    DuplicateEntryId(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an entry that does not exist.
    #[error("tried to delete an entry that is not in the database")]
    DeleteMissingEntry,

    /// Tried to update an entry that does not exist.
    #[error("tried to update an entry that is not in the database")]
    UpdateMissingEntry,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTML alert fragment for htmx requests.
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidAmount(amount) => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid amount",
                    &format!("{amount} is not a valid amount. Enter an amount greater than zero."),
                ),
            ),
            Error::DuplicateEntryId(id) => render(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Duplicate entry",
                    &format!("An entry with the id {id} already exists."),
                ),
            ),
            Error::UpdateMissingEntry => render(
                StatusCode::NOT_FOUND,
                Alert::error("Could not update entry", "The entry could not be found."),
            ),
            Error::DeleteMissingEntry => render(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not delete entry",
                    "The entry could not be found. \
                    Try refreshing the page to see if the entry has already been deleted.",
                ),
            ),
            _ => render(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        }
    }
}
