//! Implements a SQLite backed entry store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    entry::{
        Entry, EntryId, delete_all_entries, delete_entry, get_all_entries, insert_entry,
        update_entry,
    },
    ledger::EntryStore,
};

/// Stores entries in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteEntryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteEntryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn with_connection<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let connection = self
            .connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        operation(&connection)
    }
}

impl EntryStore for SqliteEntryStore {
    fn fetch_all(&self) -> Result<Vec<Entry>, Error> {
        self.with_connection(get_all_entries)
    }

    fn insert(&mut self, entry: &Entry) -> Result<i64, Error> {
        self.with_connection(|connection| insert_entry(entry, connection))
    }

    fn replace(&mut self, entry: &Entry) -> Result<(), Error> {
        self.with_connection(|connection| update_entry(entry, connection))
    }

    fn delete(&mut self, id: &EntryId) -> Result<(), Error> {
        self.with_connection(|connection| delete_entry(id, connection))
    }

    fn delete_all(&mut self) -> Result<usize, Error> {
        self.with_connection(delete_all_entries)
    }
}

#[cfg(test)]
mod sqlite_entry_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        entry::{Entry, EntryKind},
        ledger::EntryStore,
    };

    use super::SqliteEntryStore;

    fn get_test_store() -> SqliteEntryStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        SqliteEntryStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn insert_then_fetch_round_trips() {
        let mut store = get_test_store();
        let entry = Entry::draft(EntryKind::Expense, "Food", 50.0, date!(2024 - 01 - 01))
            .note("groceries")
            .into_entry();

        let row_id = store.insert(&entry).expect("Could not insert entry");

        assert!(row_id > 0);
        assert_eq!(store.fetch_all(), Ok(vec![entry]));
    }

    #[test]
    fn fetch_all_orders_newest_first() {
        let mut store = get_test_store();
        let older = Entry::draft(EntryKind::Expense, "Food", 1.0, date!(2024 - 01 - 01)).into_entry();
        let newer = Entry::draft(EntryKind::Expense, "Food", 2.0, date!(2024 - 03 - 01)).into_entry();

        store.insert(&older).expect("Could not insert entry");
        store.insert(&newer).expect("Could not insert entry");

        assert_eq!(store.fetch_all(), Ok(vec![newer, older]));
    }
}
