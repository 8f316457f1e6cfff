//! Read-only listing queries
//!
//! Listing composes optional criteria into an explicit list of predicates
//! and folds them with logical AND over the store's snippets, in store order.
//! No ranking, pagination or sorting is applied.

pub mod snippet_queries;

pub use snippet_queries::{list_snippets, Criterion, SnippetFilters, SnippetListing};
