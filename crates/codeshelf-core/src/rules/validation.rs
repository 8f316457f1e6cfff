use crate::errors::ShelfError;
use crate::model::{NewSnippet, SnippetForm};

/// Validate a submitted form
///
/// Title and code are required: present and not empty or whitespace-only.
/// The language tag is free-form; an absent language becomes the empty tag.
/// The form's id is not inspected here (create ignores it, update compares it
/// against the path id before validating).
///
/// # Errors
/// Returns every field error found, in field order (title, then code), so the
/// caller can show all of them next to the re-presented form.
pub fn validate_form(form: &SnippetForm) -> Result<NewSnippet, Vec<ShelfError>> {
    let mut errors = Vec::new();

    if let Err(err) = required(form.title.as_deref()) {
        errors.push(ShelfError::InvalidTitle {
            reason: err.to_string(),
        });
    }
    if let Err(err) = required(form.code.as_deref()) {
        errors.push(ShelfError::InvalidCode {
            reason: err.to_string(),
        });
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewSnippet::new(
        form.title.clone().unwrap_or_default(),
        form.language.clone().unwrap_or_default(),
        form.code.clone().unwrap_or_default(),
    ))
}

fn required(value: Option<&str>) -> Result<(), &'static str> {
    match value {
        None => Err("field is required"),
        Some(v) if v.trim().is_empty() => Err("cannot be empty or whitespace-only"),
        Some(_) => Ok(()),
    }
}
