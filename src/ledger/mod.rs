//! The ledger working copy and its storage backends.
//!
//! The UI never reads the database directly: it reads the [Ledger]'s
//! in-memory list through the filtering and aggregation functions, and every
//! mutation goes through the ledger so a change is only applied locally once
//! the backing store has acknowledged it.

mod sqlite;
mod store;

pub use sqlite::SqliteEntryStore;
pub use store::{EntryStore, Ledger};
