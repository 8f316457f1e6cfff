//! Subcommands
//!
//! Presentation only: each command calls one or two core operations and maps
//! the outcome to output and an exit code.

pub mod list;
pub mod render;
pub mod snippet;

use codeshelf_core::{ExError, Outcome, ShelfError, SnippetId};
use thiserror::Error;

/// Exit code for a rejected form or bad configuration
pub const EXIT_INVALID: i32 = 2;
/// Exit code for a snippet that does not exist
pub const EXIT_NOT_FOUND: i32 = 3;
/// Exit code for conflicts and store failures
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", render::validation_errors(.0))]
    Validation(Vec<ShelfError>),

    #[error("Snippet not found: {id}")]
    NotFound { id: SnippetId },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] ExError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(_) | CliError::Config(_) => EXIT_INVALID,
            CliError::NotFound { .. } => EXIT_NOT_FOUND,
            CliError::Store(_) => EXIT_FAILURE,
        }
    }
}

/// Unwrap a successful outcome, turning every other one into its CLI error
pub fn settle<T>(outcome: Outcome<T>) -> Result<T, CliError> {
    match outcome {
        Outcome::Ok(value) => Ok(value),
        Outcome::ValidationFailed { errors, .. } => Err(CliError::Validation(errors)),
        Outcome::NotFound { id } => Err(CliError::NotFound { id }),
        Outcome::Conflict(err) => Err(CliError::Store(err)),
    }
}
