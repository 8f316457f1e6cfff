//! Snippet mutations: toggle, create, update, delete
//!
//! Every operation opens its own session, re-reads the current state, acts
//! and commits. Nothing is cached between calls. Rejected writes are
//! classified with a fresh existence check: a snippet that vanished in the
//! meantime is reported as missing, one that is still there is a conflict.

use std::time::Instant;

use codeshelf_core_types::RequestId;
use tracing::span::EnteredSpan;

use super::outcome::Outcome;
use super::store::{SnippetStore, StoreSession};
use crate::errors::{ExError, Result, ShelfError};
use crate::model::{Snippet, SnippetForm, SnippetId};
use crate::rules::validate_form;
use crate::{log_op_end, log_op_error, log_op_start};

/// Flip the favorite flag of a snippet
///
/// A missing snippet is not an error: the outcome is `Ok(None)` and nothing
/// changes. On success the outcome carries the snippet as written.
///
/// # Errors
/// Returns the store's error if reading or writing fails for a reason other
/// than a concurrent change.
pub fn toggle_favorite<S: SnippetStore>(
    store: &mut S,
    id: SnippetId,
) -> Result<Outcome<Option<Snippet>>> {
    let op = OpContext::start("toggle_favorite", Some(id));
    op.finish(toggle_inner(store, id))
}

fn toggle_inner<S: SnippetStore>(store: &mut S, id: SnippetId) -> Result<Outcome<Option<Snippet>>> {
    let mut session = store.begin()?;
    let Some(mut snippet) = session.find(id)? else {
        tracing::debug!(snippet_id = id, "toggle on missing snippet ignored");
        return Ok(Outcome::Ok(None));
    };

    snippet.toggle_favorite();
    let written = session.update(&snippet).and_then(|()| session.commit());

    match written {
        Ok(()) => Ok(Outcome::Ok(Some(snippet))),
        Err(err) if err.is_concurrency() => Ok(match classify_rejected_write(store, id, err)? {
            RejectedWrite::Gone => Outcome::Ok(None),
            RejectedWrite::Conflict(err) => Outcome::Conflict(err),
        }),
        Err(err) => Err(err),
    }
}

/// Create a snippet from a submitted form
///
/// The form's id, if any, is ignored; the store assigns a fresh one. An
/// invalid form is handed back unchanged and nothing is written.
///
/// # Errors
/// Returns the store's error if the insert or commit fails.
pub fn create_snippet<S: SnippetStore>(store: &mut S, form: SnippetForm) -> Result<Outcome<Snippet>> {
    let op = OpContext::start("create_snippet", None);
    op.finish(create_inner(store, form))
}

fn create_inner<S: SnippetStore>(store: &mut S, form: SnippetForm) -> Result<Outcome<Snippet>> {
    let draft = match validate_form(&form) {
        Ok(draft) => draft,
        Err(errors) => return Ok(Outcome::ValidationFailed { input: form, errors }),
    };

    let mut session = store.begin()?;
    let snippet = session.add(draft)?;
    session.commit()?;

    Ok(Outcome::Ok(snippet))
}

/// Replace the title, language and code of an existing snippet
///
/// `form.id` must equal `id`; a mismatch (including a missing form id) is
/// reported as `NotFound` whatever the store contains. The stored favorite
/// flag is kept.
///
/// Outcomes:
/// - `ValidationFailed` with the form unchanged when title or code is blank
/// - `NotFound` when the snippet is absent on read, or vanished before the
///   write landed
/// - `Conflict` when the store rejected the write but the snippet still exists
///
/// # Errors
/// Returns the store's error for failures other than a concurrent change.
pub fn update_snippet<S: SnippetStore>(
    store: &mut S,
    id: SnippetId,
    form: SnippetForm,
) -> Result<Outcome<Snippet>> {
    let op = OpContext::start("update_snippet", Some(id));
    op.finish(update_inner(store, id, form))
}

fn update_inner<S: SnippetStore>(
    store: &mut S,
    id: SnippetId,
    form: SnippetForm,
) -> Result<Outcome<Snippet>> {
    if form.id != Some(id) {
        let mismatch = ShelfError::IdMismatch {
            path_id: id,
            form_id: form.id,
        };
        tracing::warn!(snippet_id = id, error = %mismatch, "rejecting update");
        return Ok(Outcome::NotFound { id });
    }

    let draft = match validate_form(&form) {
        Ok(draft) => draft,
        Err(errors) => return Ok(Outcome::ValidationFailed { input: form, errors }),
    };

    let mut session = store.begin()?;
    let Some(current) = session.find(id)? else {
        return Ok(Outcome::NotFound { id });
    };

    let updated = Snippet {
        id,
        title: draft.title,
        language: draft.language,
        code: draft.code,
        is_favorite: current.is_favorite,
    };
    let written = session.update(&updated).and_then(|()| session.commit());

    match written {
        Ok(()) => Ok(Outcome::Ok(updated)),
        Err(err) if err.is_concurrency() => Ok(match classify_rejected_write(store, id, err)? {
            RejectedWrite::Gone => Outcome::NotFound { id },
            RejectedWrite::Conflict(err) => Outcome::Conflict(err),
        }),
        Err(err) => Err(err),
    }
}

/// Read a single snippet (details view, edit form pre-fill)
///
/// # Errors
/// Returns the store's error if the read fails.
pub fn get_snippet<S: SnippetStore>(store: &mut S, id: SnippetId) -> Result<Outcome<Snippet>> {
    let op = OpContext::start("get_snippet", Some(id));
    op.finish(find_or_not_found(store, id))
}

/// First step of deletion: check the snippet exists and return it for confirmation
///
/// Read-only; nothing is removed.
///
/// # Errors
/// Returns the store's error if the read fails.
pub fn delete_snippet<S: SnippetStore>(store: &mut S, id: SnippetId) -> Result<Outcome<Snippet>> {
    let op = OpContext::start("delete_snippet", Some(id));
    op.finish(find_or_not_found(store, id))
}

fn find_or_not_found<S: SnippetStore>(store: &mut S, id: SnippetId) -> Result<Outcome<Snippet>> {
    let session = store.begin()?;
    Ok(match session.find(id)? {
        Some(snippet) => Outcome::Ok(snippet),
        None => Outcome::NotFound { id },
    })
}

/// Second step of deletion: remove the snippet
///
/// Always succeeds when the store does; the outcome says whether a snippet
/// was actually removed. Deleting an already-removed id is not an error.
///
/// # Errors
/// Returns the store's error if the removal or commit fails.
pub fn delete_snippet_confirmed<S: SnippetStore>(
    store: &mut S,
    id: SnippetId,
) -> Result<Outcome<bool>> {
    let op = OpContext::start("delete_snippet_confirmed", Some(id));
    op.finish(delete_confirmed_inner(store, id))
}

fn delete_confirmed_inner<S: SnippetStore>(store: &mut S, id: SnippetId) -> Result<Outcome<bool>> {
    let mut session = store.begin()?;
    let removed = match session.find(id)? {
        Some(_) => session.remove(id)?,
        None => false,
    };
    session.commit()?;

    Ok(Outcome::Ok(removed))
}

enum RejectedWrite {
    Gone,
    Conflict(ExError),
}

/// Decide what a rejected write means, using a fresh session
fn classify_rejected_write<S: SnippetStore>(
    store: &mut S,
    id: SnippetId,
    err: ExError,
) -> Result<RejectedWrite> {
    let still_present = store.begin()?.exists(id)?;
    if still_present {
        tracing::warn!(snippet_id = id, error = %err, "write rejected for a snippet that still exists");
        Ok(RejectedWrite::Conflict(
            ExError::from(ShelfError::ConcurrencyConflict { id }).with_message(format!(
                "Snippet was modified concurrently: {}",
                err.message()
            )),
        ))
    } else {
        tracing::debug!(snippet_id = id, "write rejected because the snippet is gone");
        Ok(RejectedWrite::Gone)
    }
}

/// Per-operation logging boundary: span with a fresh request id, start/end events
struct OpContext {
    op: &'static str,
    request_id: RequestId,
    started: Instant,
    _span: EnteredSpan,
}

impl OpContext {
    fn start(op: &'static str, id: Option<SnippetId>) -> Self {
        let request_id = RequestId::new();
        let span = tracing::info_span!("op", request_id = %request_id).entered();
        log_op_start!(op, snippet_id = id);
        Self {
            op,
            request_id,
            started: Instant::now(),
            _span: span,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn finish<T>(self, result: Result<Outcome<T>>) -> Result<Outcome<T>> {
        match result {
            Ok(Outcome::Conflict(err)) => {
                let err = err.with_request_id(self.request_id.clone());
                log_op_error!(
                    self.op,
                    err.clone(),
                    duration_ms = self.elapsed_ms(),
                    outcome = "conflict"
                );
                Ok(Outcome::Conflict(err))
            }
            Ok(outcome) => {
                log_op_end!(
                    self.op,
                    duration_ms = self.elapsed_ms(),
                    outcome = outcome.label()
                );
                Ok(outcome)
            }
            Err(err) => {
                let err = err.with_request_id(self.request_id.clone());
                log_op_error!(self.op, err.clone(), duration_ms = self.elapsed_ms());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::MemoryStore;

    #[test]
    fn test_create_then_get() {
        let mut store = MemoryStore::new();
        let created = create_snippet(&mut store, SnippetForm::new("foo", "py", "print(1)"))
            .unwrap()
            .ok()
            .unwrap();

        let fetched = get_snippet(&mut store, created.id).unwrap().ok().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_update_keeps_favorite_flag() {
        let mut store = MemoryStore::new();
        let created = create_snippet(&mut store, SnippetForm::new("foo", "py", "print(1)"))
            .unwrap()
            .ok()
            .unwrap();
        toggle_favorite(&mut store, created.id).unwrap();

        let form = SnippetForm::new("bar", "py", "print(2)").with_id(created.id);
        let updated = update_snippet(&mut store, created.id, form).unwrap().ok().unwrap();

        assert_eq!(updated.title, "bar");
        assert!(updated.is_favorite);
    }

    #[test]
    fn test_update_without_form_id_is_not_found() {
        let mut store = MemoryStore::new();
        let created = create_snippet(&mut store, SnippetForm::new("foo", "py", "print(1)"))
            .unwrap()
            .ok()
            .unwrap();

        let form = SnippetForm::new("bar", "py", "print(2)");
        let outcome = update_snippet(&mut store, created.id, form).unwrap();
        assert!(outcome.is_not_found());
    }
}
