use serde::{Deserialize, Serialize};

use super::snippet::{Snippet, SnippetId};

/// Create/edit payload as submitted by the caller, before validation
///
/// Every field is optional so that a half-filled form can be handed back
/// unchanged when validation fails. The favorite flag is deliberately absent:
/// it can only be changed by toggling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetForm {
    pub id: Option<SnippetId>,
    pub title: Option<String>,
    pub language: Option<String>,
    pub code: Option<String>,
}

impl SnippetForm {
    /// Form for a new snippet
    pub fn new(title: impl Into<String>, language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            language: Some(language.into()),
            code: Some(code.into()),
        }
    }

    /// Set the id the form claims to edit
    pub fn with_id(mut self, id: SnippetId) -> Self {
        self.id = Some(id);
        self
    }

    /// Edit form pre-filled from a stored snippet
    pub fn from_snippet(snippet: &Snippet) -> Self {
        Self {
            id: Some(snippet.id),
            title: Some(snippet.title.clone()),
            language: Some(snippet.language.clone()),
            code: Some(snippet.code.clone()),
        }
    }
}
