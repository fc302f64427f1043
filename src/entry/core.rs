//! Defines the core data model and database queries for ledger entries.

use std::fmt;

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The client-facing identity of an entry.
///
/// Ids are opaque strings generated on the client side of the store (see
/// [EntryId::generate]) and never reused after deletion. The database also
/// assigns an internal integer row id, but that id is never accepted as an
/// identifier by any endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id that is unique with extremely high probability.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl rusqlite::ToSql for EntryId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for EntryId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(|id| Self(id.to_owned()))
    }
}

/// Whether an entry records money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl EntryKind {
    /// The wire/database representation of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }

    /// Parse the wire representation, returning `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(EntryKind::Income),
            "expense" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl rusqlite::ToSql for EntryKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntryKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        EntryKind::parse(text).ok_or_else(|| {
            rusqlite::types::FromSqlError::Other(
                format!("\"{text}\" is not a valid entry kind").into(),
            )
        })
    }
}

/// A single income or expense record in the ledger.
///
/// To create a new `Entry`, use [Entry::draft].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The client-generated id of the entry.
    pub id: EntryId,
    /// Whether the entry is income or an expense.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// The category label for the entry. Expected, but not enforced, to come
    /// from the category registry for the entry's kind.
    pub category: String,
    /// The amount of money earned or spent. Greater than zero at creation and
    /// update time, enforced by the form and endpoints rather than storage.
    pub amount: f64,
    /// The calendar date the entry belongs to.
    pub date: Date,
    /// Optional free-text note.
    #[serde(default)]
    pub note: String,
}

impl Entry {
    /// Start building a new entry.
    ///
    /// Shortcut for [EntryDraft::new] for discoverability.
    pub fn draft(kind: EntryKind, category: &str, amount: f64, date: Date) -> EntryDraft {
        EntryDraft::new(kind, category, amount, date)
    }
}

/// An entry that has not been assigned an id yet.
///
/// Drafts come out of the entry form. The working copy assigns a generated
/// [EntryId] when the draft does not already carry one.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    /// The id to use for the entry, if the caller already has one.
    pub id: Option<EntryId>,
    /// Whether the entry is income or an expense.
    pub kind: EntryKind,
    /// The category label for the entry.
    pub category: String,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// The calendar date the entry belongs to.
    pub date: Date,
    /// Optional free-text note.
    pub note: String,
}

impl EntryDraft {
    /// Create a draft with an empty note and no id.
    pub fn new(kind: EntryKind, category: &str, amount: f64, date: Date) -> Self {
        Self {
            id: None,
            kind,
            category: category.to_owned(),
            amount,
            date,
            note: String::new(),
        }
    }

    /// Set the id for the entry.
    pub fn id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the note for the entry.
    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_owned();
        self
    }

    /// Finalize the draft, generating an id if none was provided.
    pub fn into_entry(self) -> Entry {
        Entry {
            id: self.id.unwrap_or_else(EntryId::generate),
            kind: self.kind,
            category: self.category,
            amount: self.amount,
            date: self.date,
            note: self.note,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the entry table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_entry_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS entry (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                kind TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                note TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('entry', 0)",
        (),
    )?;

    // The read path always orders by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_entry_date ON entry(date);",
        (),
    )?;

    Ok(())
}

/// Create a new entry in the database.
///
/// Returns the internal row id assigned by the database.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateEntryId] if an entry with the same client id already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn insert_entry(entry: &Entry, connection: &Connection) -> Result<i64, Error> {
    connection
        .execute(
            "INSERT INTO entry (id, kind, category, amount, date, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &entry.id,
                entry.kind,
                &entry.category,
                entry.amount,
                entry.date,
                &entry.note,
            ),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateEntryId(entry.id.to_string()),
            error => error.into(),
        })?;

    Ok(connection.last_insert_rowid())
}

/// Retrieve all entries, newest first.
///
/// Entries are ordered by date descending, then creation time descending,
/// which is the order the read endpoint promises.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_entries(connection: &Connection) -> Result<Vec<Entry>, Error> {
    connection
        .prepare(
            "SELECT id, kind, category, amount, date, note FROM entry
             ORDER BY date DESC, created_at DESC, row_id DESC",
        )?
        .query_map((), map_entry_row)?
        .map(|maybe_entry| maybe_entry.map_err(Error::SqlError))
        .collect()
}

/// Retrieve an entry from the database by its client `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid entry,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_entry(id: &EntryId, connection: &Connection) -> Result<Entry, Error> {
    let entry = connection
        .prepare("SELECT id, kind, category, amount, date, note FROM entry WHERE id = :id")?
        .query_row(&[(":id", id)], map_entry_row)?;

    Ok(entry)
}

/// Replace an existing entry with `entry`, matched by its client id.
///
/// This is a full-record replace, there is no partial-field patch.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingEntry] if no entry has the given id,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_entry(entry: &Entry, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE entry
         SET kind = ?1, category = ?2, amount = ?3, date = ?4, note = ?5,
             updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
         WHERE id = ?6",
        (
            entry.kind,
            &entry.category,
            entry.amount,
            entry.date,
            &entry.note,
            &entry.id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingEntry);
    }

    Ok(())
}

/// Delete the entry with the client `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingEntry] if no entry has the given id,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_entry(id: &EntryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM entry WHERE id = :id", &[(":id", id)])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingEntry);
    }

    Ok(())
}

/// Delete every entry, returning the number of deleted rows.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_all_entries(connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM entry", ())
        .map_err(|error| error.into())
}

/// Map a database row to an [Entry].
pub fn map_entry_row(row: &Row) -> Result<Entry, rusqlite::Error> {
    let id = row.get(0)?;
    let kind = row.get(1)?;
    let category = row.get(2)?;
    let amount = row.get(3)?;
    let date = row.get(4)?;
    let note = row.get(5)?;

    Ok(Entry {
        id,
        kind,
        category,
        amount,
        date,
        note,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        entry::{
            Entry, EntryId, EntryKind, delete_all_entries, delete_entry, get_all_entries,
            get_entry, insert_entry, update_entry,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn sample_entry(kind: EntryKind, amount: f64, date: time::Date) -> Entry {
        Entry::draft(kind, "Food", amount, date).into_entry()
    }

    #[test]
    fn insert_succeeds_and_assigns_row_id() {
        let conn = get_test_connection();
        let entry = sample_entry(EntryKind::Expense, 12.3, date!(2024 - 01 - 05));

        let row_id = insert_entry(&entry, &conn).expect("Could not insert entry");

        assert_eq!(row_id, 1);
        assert_eq!(get_entry(&entry.id, &conn), Ok(entry));
    }

    #[test]
    fn insert_fails_on_duplicate_id() {
        let conn = get_test_connection();
        let entry = sample_entry(EntryKind::Expense, 12.3, date!(2024 - 01 - 05));
        insert_entry(&entry, &conn).expect("Could not insert entry");

        let duplicate = insert_entry(&entry, &conn);

        assert_eq!(
            duplicate,
            Err(Error::DuplicateEntryId(entry.id.to_string()))
        );
    }

    #[test]
    fn get_entry_fails_on_invalid_id() {
        let conn = get_test_connection();

        let maybe_entry = get_entry(&EntryId::new("nope"), &conn);

        assert_eq!(maybe_entry, Err(Error::NotFound));
    }

    #[test]
    fn get_all_orders_by_date_then_creation_descending() {
        let conn = get_test_connection();
        let older = sample_entry(EntryKind::Income, 1000.0, date!(2024 - 01 - 01));
        let first_on_day = sample_entry(EntryKind::Expense, 200.0, date!(2024 - 01 - 02));
        let second_on_day = sample_entry(EntryKind::Expense, 300.0, date!(2024 - 01 - 02));

        for entry in [&older, &first_on_day, &second_on_day] {
            insert_entry(entry, &conn).expect("Could not insert entry");
        }

        let got = get_all_entries(&conn).expect("Could not query entries");

        // Newest date first, and within a date the most recently created row first.
        assert_eq!(got, vec![second_on_day, first_on_day, older]);
    }

    #[test]
    fn update_replaces_all_fields() {
        let conn = get_test_connection();
        let entry = sample_entry(EntryKind::Expense, 50.0, date!(2024 - 01 - 01));
        insert_entry(&entry, &conn).expect("Could not insert entry");

        let replacement = Entry {
            kind: EntryKind::Income,
            category: "Salary".to_owned(),
            amount: 2500.0,
            date: date!(2024 - 02 - 01),
            note: "January pay".to_owned(),
            ..entry.clone()
        };
        update_entry(&replacement, &conn).expect("Could not update entry");

        assert_eq!(get_entry(&entry.id, &conn), Ok(replacement));
    }

    #[test]
    fn update_fails_on_missing_entry() {
        let conn = get_test_connection();
        let entry = sample_entry(EntryKind::Expense, 50.0, date!(2024 - 01 - 01));

        let result = update_entry(&entry, &conn);

        assert_eq!(result, Err(Error::UpdateMissingEntry));
    }

    #[test]
    fn delete_removes_entry() {
        let conn = get_test_connection();
        let entry = sample_entry(EntryKind::Expense, 50.0, date!(2024 - 01 - 01));
        insert_entry(&entry, &conn).expect("Could not insert entry");

        delete_entry(&entry.id, &conn).expect("Could not delete entry");

        assert_eq!(get_entry(&entry.id, &conn), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_on_missing_entry() {
        let conn = get_test_connection();

        let result = delete_entry(&EntryId::new("gone"), &conn);

        assert_eq!(result, Err(Error::DeleteMissingEntry));
    }

    #[test]
    fn delete_all_reports_row_count() {
        let conn = get_test_connection();
        for i in 1..=3 {
            let entry = sample_entry(EntryKind::Expense, i as f64, date!(2024 - 01 - 01));
            insert_entry(&entry, &conn).expect("Could not insert entry");
        }

        let deleted = delete_all_entries(&conn).expect("Could not delete entries");

        assert_eq!(deleted, 3);
        assert_eq!(get_all_entries(&conn), Ok(vec![]));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let first = EntryId::generate();
        let second = EntryId::generate();

        assert_ne!(first, second);
    }
}
