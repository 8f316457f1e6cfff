//! Single-snippet commands: show, create, edit, toggle, delete

use clap::Args;
use codeshelf_core::ops::{
    create_snippet, delete_snippet, delete_snippet_confirmed, get_snippet, toggle_favorite,
    update_snippet,
};
use codeshelf_core::{Outcome, SnippetForm, SnippetId, SnippetStore};

use super::{render, settle, CliError};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Snippet ID
    pub id: SnippetId,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    /// Source code body
    #[arg(long)]
    pub code: String,

    /// Language tag (free-form)
    #[arg(long = "lang", default_value = "")]
    pub language: String,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Snippet ID
    pub id: SnippetId,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub code: Option<String>,

    #[arg(long = "lang")]
    pub language: Option<String>,
}

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Snippet ID
    pub id: SnippetId,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Snippet ID
    pub id: SnippetId,

    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

/// Execute show command
pub fn show<S: SnippetStore>(store: &mut S, args: ShowArgs) -> Result<(), CliError> {
    let snippet = settle(get_snippet(store, args.id)?)?;
    print!("{}", render::details(&snippet));
    Ok(())
}

/// Execute create command
pub fn create<S: SnippetStore>(store: &mut S, args: CreateArgs) -> Result<(), CliError> {
    let form = SnippetForm::new(args.title, args.language, args.code);
    let snippet = settle(create_snippet(store, form)?)?;
    println!("Created snippet {}", snippet.id);
    Ok(())
}

/// Execute edit command
///
/// The stored record pre-fills the form; flags replace individual fields and
/// the complete form is submitted as an update.
pub fn edit<S: SnippetStore>(store: &mut S, args: EditArgs) -> Result<(), CliError> {
    let current = settle(get_snippet(store, args.id)?)?;

    let mut form = SnippetForm::from_snippet(&current);
    if let Some(title) = args.title {
        form.title = Some(title);
    }
    if let Some(code) = args.code {
        form.code = Some(code);
    }
    if let Some(language) = args.language {
        form.language = Some(language);
    }

    let updated = settle(update_snippet(store, args.id, form)?)?;
    println!("Updated snippet {}", updated.id);
    Ok(())
}

/// Execute toggle command
///
/// A missing snippet is reported but is not a failure.
pub fn toggle<S: SnippetStore>(store: &mut S, args: ToggleArgs) -> Result<(), CliError> {
    match settle(toggle_favorite(store, args.id)?)? {
        Some(snippet) => println!(
            "Snippet {} favorite: {}",
            snippet.id,
            if snippet.is_favorite { "on" } else { "off" }
        ),
        None => println!("Snippet {} not found; nothing changed", args.id),
    }
    Ok(())
}

/// Execute delete command
///
/// Without `--yes` only the confirmation view is printed.
pub fn delete<S: SnippetStore>(store: &mut S, args: DeleteArgs) -> Result<(), CliError> {
    if !args.yes {
        let snippet = settle(delete_snippet(store, args.id)?)?;
        print!("{}", render::details(&snippet));
        println!("Re-run with --yes to delete snippet {}", snippet.id);
        return Ok(());
    }

    match delete_snippet_confirmed(store, args.id)? {
        Outcome::Ok(true) => println!("Deleted snippet {}", args.id),
        Outcome::Ok(false) => println!("Snippet {} was already gone", args.id),
        other => {
            settle(other)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeshelf_core::MemoryStore;

    fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        create(
            &mut store,
            CreateArgs {
                title: "foo".to_string(),
                code: "print(1)".to_string(),
                language: "py".to_string(),
            },
        )
        .unwrap();
        store
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let mut store = seeded();
        edit(
            &mut store,
            EditArgs {
                id: 1,
                title: Some("bar".to_string()),
                code: None,
                language: None,
            },
        )
        .unwrap();

        let stored = get_snippet(&mut store, 1).unwrap().ok().unwrap();
        assert_eq!(stored.title, "bar");
        assert_eq!(stored.code, "print(1)");
        assert_eq!(stored.language, "py");
    }

    #[test]
    fn test_edit_with_blank_code_is_validation_error() {
        let mut store = seeded();
        let err = edit(
            &mut store,
            EditArgs {
                id: 1,
                title: None,
                code: Some("  ".to_string()),
                language: None,
            },
        )
        .unwrap_err();

        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_edit_missing_snippet_is_not_found() {
        let mut store = MemoryStore::new();
        let err = edit(
            &mut store,
            EditArgs {
                id: 9,
                title: None,
                code: None,
                language: None,
            },
        )
        .unwrap_err();

        assert!(matches!(err, CliError::NotFound { id: 9 }));
    }

    #[test]
    fn test_delete_without_yes_keeps_snippet() {
        let mut store = seeded();
        delete(&mut store, DeleteArgs { id: 1, yes: false }).unwrap();
        assert_eq!(store.len().unwrap(), 1);

        delete(&mut store, DeleteArgs { id: 1, yes: true }).unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_toggle_missing_is_not_an_error() {
        let mut store = MemoryStore::new();
        toggle(&mut store, ToggleArgs { id: 4 }).unwrap();
    }
}
