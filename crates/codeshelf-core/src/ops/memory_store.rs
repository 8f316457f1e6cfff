use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::store::{SnippetStore, StoreSession};
use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::{NewSnippet, Snippet, SnippetId};

#[derive(Debug, Clone)]
struct MemoryState {
    snippets: BTreeMap<SnippetId, Snippet>,
    next_id: SnippetId,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            snippets: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory snippet store
///
/// Cloning the store yields another handle to the same shared state, so
/// handles can be moved across threads to simulate concurrent callers. A
/// session holds the state lock until it is committed or dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed snippet, keeping its id
    ///
    /// Used by fixtures that need specific ids. Later `add` calls continue
    /// after the highest id seen.
    ///
    /// # Errors
    /// Returns an `InvalidInput` error for an id with no successor (`i64::MAX`),
    /// or an `Internal` error if the state lock is poisoned.
    pub fn insert_snippet(&self, snippet: Snippet) -> Result<()> {
        let following = snippet.id.checked_add(1).ok_or_else(|| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("memory_insert")
                .with_entity_id(snippet.id.to_string())
                .with_message("snippet id leaves no room for later ids")
        })?;
        let mut state = lock(&self.state)?;
        state.next_id = state.next_id.max(following);
        state.snippets.insert(snippet.id, snippet);
        Ok(())
    }

    /// Number of committed snippets
    ///
    /// # Errors
    /// Returns an `Internal` error if the state lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(lock(&self.state)?.snippets.len())
    }

    /// # Errors
    /// Returns an `Internal` error if the state lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock(state: &Mutex<MemoryState>) -> Result<MutexGuard<'_, MemoryState>> {
    state.lock().map_err(|_| {
        ExError::new(ExErrorKind::Internal)
            .with_op("memory_store_lock")
            .with_message("store state lock poisoned")
    })
}

/// Session over a [`MemoryStore`]; writes go to a staged copy until commit
pub struct MemorySession<'a> {
    guard: MutexGuard<'a, MemoryState>,
    staged: MemoryState,
}

impl SnippetStore for MemoryStore {
    type Session<'a> = MemorySession<'a>;

    fn begin(&mut self) -> Result<MemorySession<'_>> {
        let guard = lock(&self.state)?;
        let staged = guard.clone();
        Ok(MemorySession { guard, staged })
    }
}

impl StoreSession for MemorySession<'_> {
    fn find(&self, id: SnippetId) -> Result<Option<Snippet>> {
        Ok(self.staged.snippets.get(&id).cloned())
    }

    fn query_all(&self) -> Result<Vec<Snippet>> {
        Ok(self.staged.snippets.values().cloned().collect())
    }

    fn exists(&self, id: SnippetId) -> Result<bool> {
        Ok(self.staged.snippets.contains_key(&id))
    }

    fn add(&mut self, snippet: NewSnippet) -> Result<Snippet> {
        let id = self.staged.next_id;
        self.staged.next_id += 1;

        let snippet = snippet.with_id(id);
        self.staged.snippets.insert(id, snippet.clone());
        Ok(snippet)
    }

    fn update(&mut self, snippet: &Snippet) -> Result<()> {
        match self.staged.snippets.get_mut(&snippet.id) {
            Some(stored) => {
                *stored = snippet.clone();
                Ok(())
            }
            None => Err(ExError::new(ExErrorKind::Concurrency)
                .with_op("memory_update")
                .with_entity_id(snippet.id.to_string())
                .with_message("no row to update")),
        }
    }

    fn remove(&mut self, id: SnippetId) -> Result<bool> {
        Ok(self.staged.snippets.remove(&id).is_some())
    }

    fn commit(mut self) -> Result<()> {
        *self.guard = self.staged;
        Ok(())
    }
}
