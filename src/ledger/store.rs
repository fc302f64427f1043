//! The in-memory working copy of the entry list.

use crate::{
    Error,
    entry::{Entry, EntryDraft, EntryId},
};

/// The storage backend behind a [Ledger].
///
/// Implementations persist entries; the ledger keeps the in-memory list
/// consistent with whatever the store reports.
pub trait EntryStore {
    /// Fetch every stored entry, ordered by date descending then creation
    /// time descending.
    fn fetch_all(&self) -> Result<Vec<Entry>, Error>;

    /// Persist a new entry, returning the store's internal row id.
    fn insert(&mut self, entry: &Entry) -> Result<i64, Error>;

    /// Replace the stored entry with the same id as `entry`.
    fn replace(&mut self, entry: &Entry) -> Result<(), Error>;

    /// Delete the stored entry with the given id.
    fn delete(&mut self, id: &EntryId) -> Result<(), Error>;

    /// Delete every stored entry, returning how many were removed.
    fn delete_all(&mut self) -> Result<usize, Error>;
}

/// The UI's working copy of the entry list.
///
/// All mutations are fire-and-confirm: the store is asked first, and the
/// in-memory list only changes once the store reports success. A failed
/// operation therefore leaves the list exactly as it was, with no rollback
/// needed.
#[derive(Debug)]
pub struct Ledger<S> {
    entries: Vec<Entry>,
    store: S,
}

impl<S: EntryStore> Ledger<S> {
    /// Create an empty working copy over `store`.
    ///
    /// Call [Ledger::load] to populate it.
    pub fn new(store: S) -> Self {
        Self {
            entries: Vec::new(),
            store,
        }
    }

    /// The current working copy, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Replace the working copy wholesale with the store's contents.
    ///
    /// # Errors
    /// Propagates the store error, leaving the list untouched.
    pub fn load(&mut self) -> Result<(), Error> {
        self.entries = self.store.fetch_all()?;

        Ok(())
    }

    /// Persist a new entry and prepend it to the working copy.
    ///
    /// A draft without an id gets a generated [EntryId]. Returns the stored
    /// entry.
    ///
    /// # Errors
    /// Propagates the store error, leaving the list untouched.
    pub fn add(&mut self, draft: EntryDraft) -> Result<Entry, Error> {
        let entry = draft.into_entry();

        self.store.insert(&entry)?;
        self.entries.insert(0, entry.clone());

        Ok(entry)
    }

    /// Replace an existing entry, keeping its position in the working copy.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingEntry] if the store has no entry with the
    /// given id. The list is untouched on any error.
    pub fn update(&mut self, entry: Entry) -> Result<(), Error> {
        self.store.replace(&entry)?;

        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == entry.id) {
            *existing = entry;
        }

        Ok(())
    }

    /// Delete the entry with the given id and drop it from the working copy.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingEntry] if the store has no entry with the
    /// given id, e.g. when a second delete races a first one. The list is
    /// untouched on any error.
    pub fn remove(&mut self, id: &EntryId) -> Result<(), Error> {
        self.store.delete(id)?;
        self.entries.retain(|entry| &entry.id != id);

        Ok(())
    }

    /// Delete every entry and reset the working copy to empty.
    ///
    /// Returns how many entries the store removed.
    ///
    /// # Errors
    /// Propagates the store error, leaving the list untouched.
    pub fn wipe_all(&mut self) -> Result<usize, Error> {
        let deleted = self.store.delete_all()?;
        self.entries.clear();

        Ok(deleted)
    }

    /// Find an entry in the working copy by id.
    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }
}
