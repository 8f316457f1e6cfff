pub mod form;
pub mod snippet;

pub use form::SnippetForm;
pub use snippet::{NewSnippet, Snippet, SnippetId};
