use serde::{Deserialize, Serialize};

/// Store-assigned snippet identifier. Never reused once a snippet is deleted.
pub type SnippetId = i64;

/// Snippet - a stored code sample
///
/// A snippet is either fully present in the store or absent; there is no
/// tombstoned state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Unique identifier assigned by the store on creation
    pub id: SnippetId,

    /// Human-readable title
    pub title: String,

    /// Free-form language tag (e.g. "rust", "py"); matched exactly when filtering
    pub language: String,

    /// Code body
    pub code: String,

    /// Favorite flag, only changed through the toggle operation
    pub is_favorite: bool,
}

impl Snippet {
    /// Flip the favorite flag, returning the new value
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }
}

/// A validated snippet that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSnippet {
    pub title: String,
    pub language: String,
    pub code: String,
}

impl NewSnippet {
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            code: code.into(),
        }
    }

    /// Attach the store-assigned id. New snippets always start as non-favorites.
    pub fn with_id(self, id: SnippetId) -> Snippet {
        Snippet {
            id,
            title: self.title,
            language: self.language,
            code: self.code,
            is_favorite: false,
        }
    }
}
