//! Store seam consumed by the filter composer and mutation coordinator
//!
//! A [`SnippetStore`] hands out one [`StoreSession`] per operation. The
//! session is the unit of work: reads see the store's current state, writes
//! are staged until [`StoreSession::commit`], and dropping a session without
//! committing rolls everything back.

use crate::errors::Result;
use crate::model::{NewSnippet, Snippet, SnippetId};

/// A single acquire -> use -> commit/rollback -> release unit of work
pub trait StoreSession {
    /// Look up a snippet by id
    ///
    /// # Errors
    /// Returns a `Persistence` error if the backing store fails.
    fn find(&self, id: SnippetId) -> Result<Option<Snippet>>;

    /// All snippets in store-native order (ascending id, i.e. insertion order)
    ///
    /// # Errors
    /// Returns a `Persistence` error if the backing store fails.
    fn query_all(&self) -> Result<Vec<Snippet>>;

    /// Whether a snippet with this id is currently present
    ///
    /// # Errors
    /// Returns a `Persistence` error if the backing store fails.
    fn exists(&self, id: SnippetId) -> Result<bool> {
        Ok(self.find(id)?.is_some())
    }

    /// Insert a new snippet, assigning it a fresh id
    ///
    /// # Errors
    /// Returns a `Persistence` error if the backing store fails.
    fn add(&mut self, snippet: NewSnippet) -> Result<Snippet>;

    /// Overwrite the stored snippet with the same id
    ///
    /// # Errors
    /// Returns a `Concurrency` error when the write cannot be applied because
    /// the row changed underneath the session or no longer exists. Callers
    /// tell those two apart with an explicit existence re-check.
    fn update(&mut self, snippet: &Snippet) -> Result<()>;

    /// Remove a snippet. Absent ids are tolerated; returns whether a row was removed.
    ///
    /// # Errors
    /// Returns a `Persistence` error if the backing store fails.
    fn remove(&mut self, id: SnippetId) -> Result<bool>;

    /// Make the staged writes visible to other sessions
    ///
    /// # Errors
    /// Returns a `Persistence` or `Concurrency` error if the commit is rejected;
    /// nothing is applied in that case.
    fn commit(self) -> Result<()>
    where
        Self: Sized;
}

/// Handle to a snippet store
pub trait SnippetStore {
    type Session<'a>: StoreSession
    where
        Self: 'a;

    /// Acquire a session
    ///
    /// # Errors
    /// Returns an error if the store cannot start a unit of work (lock
    /// poisoned, database unavailable).
    fn begin(&mut self) -> Result<Self::Session<'_>>;
}
