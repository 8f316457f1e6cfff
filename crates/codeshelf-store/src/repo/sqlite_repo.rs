//! SQLite repository implementation
//!
//! One connection per [`SqliteStore`]; each session is an IMMEDIATE SQLite
//! transaction that rolls back when dropped uncommitted. The write lock is
//! taken at begin, so writers on other connections wait on the busy timeout.

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::time::Duration;

use codeshelf_core::errors::{ExError, ExErrorKind};
use codeshelf_core::{NewSnippet, Snippet, SnippetId, SnippetStore, StoreSession};
use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

use crate::db;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;

const SELECT_COLUMNS: &str = "SELECT id, title, language, code, is_favorite FROM snippets";

/// SQLite-backed snippet store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and bring its schema up to date
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, configured or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening snippet database");
        Self::from_connection(db::open(path)?)
    }

    /// Fresh in-memory database with the schema applied
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate or migrate the database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Change how long writes wait on another connection's lock
    ///
    /// # Errors
    /// Returns a `Persistence` error if SQLite rejects the setting.
    pub fn with_busy_timeout(self, timeout: Duration) -> Result<Self> {
        self.conn.busy_timeout(timeout).map_err(from_rusqlite)?;
        Ok(self)
    }

    /// Underlying connection, for inspection in tests and tooling
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SnippetStore for SqliteStore {
    type Session<'a> = SqliteSession<'a>;

    fn begin(&mut self) -> Result<SqliteSession<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        Ok(SqliteSession { tx })
    }
}

/// Unit of work over a [`SqliteStore`]
pub struct SqliteSession<'a> {
    tx: Transaction<'a>,
}

fn snippet_from_row(row: &Row<'_>) -> rusqlite::Result<Snippet> {
    Ok(Snippet {
        id: row.get(0)?,
        title: row.get(1)?,
        language: row.get(2)?,
        code: row.get(3)?,
        is_favorite: row.get(4)?,
    })
}

impl StoreSession for SqliteSession<'_> {
    fn find(&self, id: SnippetId) -> Result<Option<Snippet>> {
        self.tx
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                [id],
                snippet_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    fn query_all(&self) -> Result<Vec<Snippet>> {
        let mut stmt = self
            .tx
            .prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .map_err(from_rusqlite)?;
        let snippets = stmt
            .query_map([], snippet_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(snippets)
    }

    fn exists(&self, id: SnippetId) -> Result<bool> {
        self.tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM snippets WHERE id = ?1)",
                [id],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)
    }

    fn add(&mut self, snippet: NewSnippet) -> Result<Snippet> {
        self.tx
            .execute(
                "INSERT INTO snippets (title, language, code, is_favorite) VALUES (?1, ?2, ?3, 0)",
                rusqlite::params![snippet.title, snippet.language, snippet.code],
            )
            .map_err(from_rusqlite)?;

        Ok(snippet.with_id(self.tx.last_insert_rowid()))
    }

    fn update(&mut self, snippet: &Snippet) -> Result<()> {
        let changed = self
            .tx
            .execute(
                "UPDATE snippets SET title = ?1, language = ?2, code = ?3, is_favorite = ?4
                 WHERE id = ?5",
                rusqlite::params![
                    snippet.title,
                    snippet.language,
                    snippet.code,
                    snippet.is_favorite,
                    snippet.id,
                ],
            )
            .map_err(|e| from_rusqlite(e).with_entity_id(snippet.id.to_string()))?;

        // The only conflict signal: the row is gone.
        if changed == 0 {
            return Err(ExError::new(ExErrorKind::Concurrency)
                .with_op("sqlite_update")
                .with_entity_id(snippet.id.to_string())
                .with_message("no row to update"));
        }
        Ok(())
    }

    fn remove(&mut self, id: SnippetId) -> Result<bool> {
        let removed = self
            .tx
            .execute("DELETE FROM snippets WHERE id = ?1", [id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    fn commit(self) -> Result<()> {
        self.tx.commit().map_err(from_rusqlite)
    }
}
