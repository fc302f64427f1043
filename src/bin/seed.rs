//! Populates a database with a handful of demo entries.

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use tallybook::{Entry, EntryKind, initialize_db, insert_entry};

/// Create a tallybook database with demo data.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database to create or extend.
    #[arg(long)]
    db_path: String,
}

fn main() {
    let args = Args::parse();

    let connection = Connection::open(&args.db_path).expect("Could not open the database file.");
    initialize_db(&connection).expect("Could not initialize the database.");

    let today = OffsetDateTime::now_utc().date();

    let drafts = [
        (EntryKind::Income, "Salary", 3200.0, 25, "Monthly pay"),
        (EntryKind::Income, "Investment", 84.2, 20, "Dividends"),
        (EntryKind::Expense, "Housing", 1150.0, 24, "Rent"),
        (EntryKind::Expense, "Food", 63.75, 6, "Groceries"),
        (EntryKind::Expense, "Food", 18.4, 3, "Lunch out"),
        (EntryKind::Expense, "Transport", 42.0, 2, "Fuel"),
        (EntryKind::Expense, "Entertainment", 12.99, 1, ""),
        (EntryKind::Expense, "Health", 29.5, 0, "Pharmacy"),
    ];

    for (kind, category, amount, days_ago, note) in drafts {
        let entry = Entry::draft(kind, category, amount, today - Duration::days(days_ago))
            .note(note)
            .into_entry();

        insert_entry(&entry, &connection).expect("Could not insert demo entry.");
    }

    println!("Seeded {} entries into {}", drafts.len(), args.db_path);
}
