use crate::errors::{ExError, ShelfError};
use crate::model::{SnippetForm, SnippetId};

/// Result of a coordinator operation
///
/// `ValidationFailed` and `NotFound` are expected outcomes the caller renders
/// (re-show the form, report the missing snippet). `Conflict` is not: it means
/// the store rejected a write for a snippet that still exists, and callers
/// should treat it as fatal, typically via [`Outcome::into_result`].
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Ok(T),
    ValidationFailed {
        /// The submitted form, unchanged, for re-editing
        input: SnippetForm,
        errors: Vec<ShelfError>,
    },
    NotFound {
        id: SnippetId,
    },
    Conflict(ExError),
}

impl<T> Outcome<T> {
    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Ok(_) => "ok",
            Outcome::ValidationFailed { .. } => "validation_failed",
            Outcome::NotFound { .. } => "not_found",
            Outcome::Conflict(_) => "conflict",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Outcome::Conflict(_))
    }

    /// The success value, if any
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::ValidationFailed { input, errors } => {
                Outcome::ValidationFailed { input, errors }
            }
            Outcome::NotFound { id } => Outcome::NotFound { id },
            Outcome::Conflict(err) => Outcome::Conflict(err),
        }
    }

    /// Propagate a conflict as an error, keeping every other outcome
    ///
    /// # Errors
    /// Returns the store's concurrency error when the outcome is `Conflict`.
    pub fn into_result(self) -> Result<Outcome<T>, ExError> {
        match self {
            Outcome::Conflict(err) => Err(err),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_labels() {
        assert_eq!(Outcome::Ok(1).label(), "ok");
        assert_eq!(Outcome::<()>::NotFound { id: 1 }.label(), "not_found");
        assert_eq!(
            Outcome::<()>::Conflict(ExError::new(ExErrorKind::Concurrency)).label(),
            "conflict"
        );
    }

    #[test]
    fn test_into_result_propagates_conflict_only() {
        let conflict = Outcome::<()>::Conflict(ExError::new(ExErrorKind::Concurrency));
        let err = conflict.into_result().unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Concurrency);

        let missing = Outcome::<()>::NotFound { id: 4 }.into_result().unwrap();
        assert!(missing.is_not_found());
    }

    #[test]
    fn test_map_keeps_variant() {
        assert_eq!(Outcome::Ok(2).map(|v| v * 2).ok(), Some(4));
        assert!(Outcome::<i32>::NotFound { id: 9 }
            .map(|v| v * 2)
            .is_not_found());
    }
}
