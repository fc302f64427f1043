//! Ledger entry management.
//!
//! This module contains everything related to entries:
//! - The `Entry` model and `EntryDraft` for creating entries
//! - Database functions for storing, querying, and managing entries
//! - View handlers for the ledger pages and their htmx endpoints

mod cards;
mod charts;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod edit_entry_page;
mod form;
mod ledger_page;
mod new_entry_page;
mod table;
mod wipe_endpoint;

pub use core::{
    Entry, EntryDraft, EntryId, EntryKind, create_entry_table, delete_all_entries, delete_entry,
    get_all_entries, get_entry, insert_entry, map_entry_row, update_entry,
};
pub use create_endpoint::create_entry_endpoint;
pub use delete_endpoint::delete_entry_endpoint;
pub use edit_endpoint::edit_entry_endpoint;
pub use edit_entry_page::get_edit_entry_page;
pub use ledger_page::get_ledger_page;
pub use new_entry_page::get_new_entry_page;
pub use wipe_endpoint::wipe_entries_endpoint;
