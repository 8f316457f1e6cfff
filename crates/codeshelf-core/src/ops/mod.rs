pub mod memory_store;
pub mod outcome;
pub mod snippet_ops;
pub mod store;

pub use memory_store::{MemorySession, MemoryStore};
pub use outcome::Outcome;
pub use snippet_ops::{
    create_snippet, delete_snippet, delete_snippet_confirmed, get_snippet, toggle_favorite,
    update_snippet,
};
pub use store::{SnippetStore, StoreSession};
