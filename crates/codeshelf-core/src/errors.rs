use codeshelf_core_types::RequestId;
use thiserror::Error;

use crate::model::SnippetId;

/// Result type alias using the structured error facility
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// test assertions and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidTitle,
    InvalidCode,

    // Existence
    NotFound,
    IdMismatch,

    // Mutation
    Concurrency,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidTitle => "ERR_INVALID_TITLE",
            ExErrorKind::InvalidCode => "ERR_INVALID_CODE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::IdMismatch => "ERR_ID_MISMATCH",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, snippet id, request id) for debugging. Store
/// implementations report every failure through this type.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when a store rejected a write because of a concurrent change
    pub fn is_concurrency(&self) -> bool {
        self.kind == ExErrorKind::Concurrency
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (snippet_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures raised by the snippet operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShelfError {
    /// Snippet not found in store
    #[error("Snippet not found: {id}")]
    SnippetNotFound { id: SnippetId },

    /// The id in the request path disagrees with the id in the submitted form
    #[error("Snippet id mismatch: path id {path_id}, form id {form_id:?}")]
    IdMismatch {
        path_id: SnippetId,
        form_id: Option<SnippetId>,
    },

    /// Title missing, empty or whitespace-only
    #[error("Invalid title: {reason}")]
    InvalidTitle { reason: String },

    /// Code body missing, empty or whitespace-only
    #[error("Invalid code: {reason}")]
    InvalidCode { reason: String },

    /// The store rejected a write while the snippet still exists
    #[error("Concurrent modification of snippet {id}")]
    ConcurrencyConflict { id: SnippetId },
}

impl ShelfError {
    /// Name of the form field a validation error belongs to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ShelfError::InvalidTitle { .. } => Some("title"),
            ShelfError::InvalidCode { .. } => Some("code"),
            _ => None,
        }
    }
}

impl From<ShelfError> for ExError {
    fn from(err: ShelfError) -> Self {
        match err {
            ShelfError::SnippetNotFound { id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(id.to_string())
                .with_message("Snippet not found"),

            ShelfError::IdMismatch { path_id, form_id } => ExError::new(ExErrorKind::IdMismatch)
                .with_entity_id(path_id.to_string())
                .with_message(match form_id {
                    Some(form_id) => format!("Form carries snippet id {}", form_id),
                    None => "Form carries no snippet id".to_string(),
                }),

            ShelfError::InvalidTitle { reason } => ExError::new(ExErrorKind::InvalidTitle)
                .with_message(format!("Invalid title: {}", reason)),

            ShelfError::InvalidCode { reason } => ExError::new(ExErrorKind::InvalidCode)
                .with_message(format!("Invalid code: {}", reason)),

            ShelfError::ConcurrencyConflict { id } => ExError::new(ExErrorKind::Concurrency)
                .with_entity_id(id.to_string())
                .with_message("Snippet was modified concurrently"),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_op_and_entity() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("toggle_favorite")
            .with_entity_id("42")
            .with_message("Snippet not found");

        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND]"));
        assert!(rendered.contains("toggle_favorite"));
        assert!(rendered.contains("snippet_id: 42"));
    }

    #[test]
    fn test_validation_errors_name_their_field() {
        let title = ShelfError::InvalidTitle {
            reason: "required".to_string(),
        };
        let code = ShelfError::InvalidCode {
            reason: "required".to_string(),
        };
        assert_eq!(title.field(), Some("title"));
        assert_eq!(code.field(), Some("code"));
        assert_eq!(ShelfError::SnippetNotFound { id: 1 }.field(), None);
    }

    #[test]
    fn test_is_concurrency() {
        assert!(ExError::new(ExErrorKind::Concurrency).is_concurrency());
        assert!(!ExError::new(ExErrorKind::Persistence).is_concurrency());
    }
}
