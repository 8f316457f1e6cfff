use codeshelf_core::errors::{ExError, ExErrorKind, Result};
use codeshelf_core::ops::MemorySession;
use codeshelf_core::{MemoryStore, NewSnippet, Snippet, SnippetId, SnippetStore, StoreSession};

/// Create a new empty store for testing
#[allow(dead_code)]
pub fn new_store() -> MemoryStore {
    MemoryStore::new()
}

/// Build a snippet with an explicit id and favorite flag
#[allow(dead_code)]
pub fn snippet(id: SnippetId, title: &str, language: &str, code: &str, favorite: bool) -> Snippet {
    let mut snippet = NewSnippet::new(title, language, code).with_id(id);
    snippet.is_favorite = favorite;
    snippet
}

/// Store pre-loaded with snippets (bypassing the create operation)
#[allow(dead_code)]
pub fn store_with(snippets: impl IntoIterator<Item = Snippet>) -> MemoryStore {
    let store = MemoryStore::new();
    for s in snippets {
        store.insert_snippet(s).unwrap();
    }
    store
}

/// Read every committed snippet
#[allow(dead_code)]
pub fn all_snippets(store: &mut MemoryStore) -> Vec<Snippet> {
    store.begin().unwrap().query_all().unwrap()
}

/// What the faulty store does when asked to write an update
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Behave like the wrapped store
    None,
    /// Another writer deletes and commits the snippet, then the write is rejected
    DeleteBeforeWrite,
    /// The write is rejected while the snippet stays in place
    RejectWrite,
    /// The store cannot open sessions at all
    Unavailable,
}

/// Wraps a [`MemoryStore`] and injects failures at write time
#[allow(dead_code)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    pub fault: Fault,
}

#[allow(dead_code)]
impl FaultyStore {
    pub fn new(inner: MemoryStore, fault: Fault) -> Self {
        Self { inner, fault }
    }
}

pub struct FaultySession<'a> {
    inner: Option<MemorySession<'a>>,
    handle: MemoryStore,
    fault: Fault,
}

impl SnippetStore for FaultyStore {
    type Session<'a> = FaultySession<'a>;

    fn begin(&mut self) -> Result<FaultySession<'_>> {
        if self.fault == Fault::Unavailable {
            return Err(ExError::new(ExErrorKind::Persistence)
                .with_op("faulty_begin")
                .with_message("database unavailable"));
        }
        let handle = self.inner.clone();
        let fault = self.fault;
        Ok(FaultySession {
            inner: Some(self.inner.begin()?),
            handle,
            fault,
        })
    }
}

impl<'a> FaultySession<'a> {
    fn session(&self) -> Result<&MemorySession<'a>> {
        self.inner.as_ref().ok_or_else(released)
    }
}

fn released() -> ExError {
    ExError::new(ExErrorKind::Internal).with_message("session already released")
}

fn rejected(id: SnippetId) -> ExError {
    ExError::new(ExErrorKind::Concurrency)
        .with_op("faulty_update")
        .with_entity_id(id.to_string())
        .with_message("write rejected")
}

impl StoreSession for FaultySession<'_> {
    fn find(&self, id: SnippetId) -> Result<Option<Snippet>> {
        self.session()?.find(id)
    }

    fn query_all(&self) -> Result<Vec<Snippet>> {
        self.session()?.query_all()
    }

    fn add(&mut self, snippet: NewSnippet) -> Result<Snippet> {
        self.inner.as_mut().ok_or_else(released)?.add(snippet)
    }

    fn update(&mut self, snippet: &Snippet) -> Result<()> {
        match self.fault {
            Fault::DeleteBeforeWrite => {
                // Release our lock so the concurrent deleter can commit.
                self.inner = None;
                let mut deleter = self.handle.clone();
                let mut session = deleter.begin()?;
                session.remove(snippet.id)?;
                session.commit()?;
                Err(rejected(snippet.id))
            }
            Fault::RejectWrite => Err(rejected(snippet.id)),
            Fault::None | Fault::Unavailable => {
                self.inner.as_mut().ok_or_else(released)?.update(snippet)
            }
        }
    }

    fn remove(&mut self, id: SnippetId) -> Result<bool> {
        self.inner.as_mut().ok_or_else(released)?.remove(id)
    }

    fn commit(self) -> Result<()> {
        match self.inner {
            Some(session) => session.commit(),
            None => Err(released()),
        }
    }
}
