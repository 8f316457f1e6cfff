//! Repository layer persisting snippets to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::{SqliteSession, SqliteStore};
