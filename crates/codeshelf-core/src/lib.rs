//! Codeshelf Core - snippet records, listing filters and mutation rules
//!
//! This crate provides:
//! - The `Snippet` model and the `SnippetForm` create/edit payload
//! - The store seam (`SnippetStore` / `StoreSession`) and an in-memory store
//! - Listing with composable favorite / language / search criteria
//! - Toggle, create, update and two-step delete with consistent
//!   not-found and conflict classification
//! - Structured errors and the logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod queries;
pub mod rules;

pub use codeshelf_core_types::schema;

#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, ShelfError};
pub use model::{NewSnippet, Snippet, SnippetForm, SnippetId};
pub use ops::{MemoryStore, Outcome, SnippetStore, StoreSession};
pub use queries::{list_snippets, SnippetFilters, SnippetListing};
