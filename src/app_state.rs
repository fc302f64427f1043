//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    ledger::{Ledger, SqliteEntryStore},
    pagination::PaginationConfig,
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The UI's working copy of the entry list.
    ///
    /// Page handlers reload it on every page view and mutation endpoints go
    /// through it, so a change is only applied locally once the database has
    /// acknowledged it. The JSON API writes to the database directly; those
    /// writes become visible here on the next page load.
    pub ledger: Arc<Mutex<Ledger<SqliteEntryStore>>>,

    /// The database connection, shared with the ledger's store.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The config that controls how the entry table is paged.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models, and load the ledger's working copy.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or read.
    pub fn new(
        db_connection: Connection,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));
        let mut ledger = Ledger::new(SqliteEntryStore::new(connection.clone()));
        ledger.load()?;

        Ok(Self {
            ledger: Arc::new(Mutex::new(ledger)),
            db_connection: connection,
            pagination_config,
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use rusqlite::Connection;

    use super::AppState;

    #[test]
    fn new_initializes_schema_and_loads_ledger() {
        let conn = Connection::open_in_memory().unwrap();

        let state = AppState::new(conn, Default::default()).expect("Could not create app state");

        assert!(state.ledger.lock().unwrap().entries().is_empty());
    }
}
