use std::time::Instant;

use codeshelf_core_types::RequestId;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::Snippet;
use crate::ops::{SnippetStore, StoreSession};
use crate::{log_op_end, log_op_error, log_op_start};

/// Label reported when only the favorites criterion is active
pub const FAVORITES_LABEL: &str = "Favorites";

/// Prefix of the label reported when a search criterion is active
pub const SEARCH_LABEL_PREFIX: &str = "Search: ";

/// Optional listing criteria as supplied by the caller
///
/// Empty strings are treated like absent values. Whitespace is not trimmed:
/// `" "` is a valid language tag and a valid search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetFilters {
    pub favorites_only: bool,
    pub language: Option<String>,
    pub search: Option<String>,
}

impl SnippetFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Active criteria in application order: favorites, language, search
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut criteria = Vec::with_capacity(3);
        if self.favorites_only {
            criteria.push(Criterion::Favorite);
        }
        if let Some(language) = non_empty(self.language.as_deref()) {
            criteria.push(Criterion::Language(language.to_string()));
        }
        if let Some(search) = non_empty(self.search.as_deref()) {
            criteria.push(Criterion::Search(search.to_string()));
        }
        criteria
    }

    /// Label of the highlighted criterion
    ///
    /// Each applied criterion overwrites the label of the previous one, so
    /// search beats language beats favorites even though all of them filter.
    pub fn active_label(&self) -> Option<String> {
        self.criteria()
            .iter()
            .fold(None, |_, criterion| Some(criterion.label()))
    }

    /// Whether a snippet passes every active criterion
    pub fn matches(&self, snippet: &Snippet) -> bool {
        self.criteria().iter().all(|c| c.matches(snippet))
    }

    /// Narrow `candidates` by each criterion in turn, preserving their order
    pub fn apply(&self, candidates: Vec<Snippet>) -> Vec<Snippet> {
        self.criteria().iter().fold(candidates, |remaining, criterion| {
            remaining
                .into_iter()
                .filter(|snippet| criterion.matches(snippet))
                .collect()
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A single listing predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Only snippets marked as favorite
    Favorite,
    /// Exact, case-sensitive language tag match
    Language(String),
    /// Case-sensitive substring of the title or the code body
    Search(String),
}

impl Criterion {
    pub fn matches(&self, snippet: &Snippet) -> bool {
        match self {
            Criterion::Favorite => snippet.is_favorite,
            Criterion::Language(language) => snippet.language == *language,
            Criterion::Search(text) => {
                snippet.title.contains(text.as_str()) || snippet.code.contains(text.as_str())
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Criterion::Favorite => FAVORITES_LABEL.to_string(),
            Criterion::Language(language) => language.clone(),
            Criterion::Search(text) => format!("{}{}", SEARCH_LABEL_PREFIX, text),
        }
    }
}

/// Filtered view of the store plus the label to highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetListing {
    pub snippets: Vec<Snippet>,
    /// `None` when no criterion is active
    pub active_filter: Option<String>,
}

/// List snippets matching every active criterion
///
/// Opens a read-only session; nothing is committed.
///
/// # Errors
/// Returns the store's error if the session cannot be opened or read.
pub fn list_snippets<S: SnippetStore>(
    store: &mut S,
    filters: &SnippetFilters,
) -> Result<SnippetListing> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("op", request_id = %request_id);
    let _entered = span.enter();
    let started = Instant::now();
    log_op_start!(
        "list_snippets",
        favorites_only = filters.favorites_only,
        criteria = filters.criteria().len()
    );

    let listed = store.begin().and_then(|session| session.query_all());
    let candidates = match listed {
        Ok(candidates) => candidates,
        Err(err) => {
            let err = err.with_request_id(request_id);
            log_op_error!(
                "list_snippets",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            return Err(err);
        }
    };

    let listing = SnippetListing {
        snippets: filters.apply(candidates),
        active_filter: filters.active_label(),
    };

    log_op_end!(
        "list_snippets",
        duration_ms = started.elapsed().as_millis() as u64,
        result_len = listing.snippets.len(),
        filter_label = listing.active_filter.as_deref().unwrap_or("")
    );

    Ok(listing)
}
