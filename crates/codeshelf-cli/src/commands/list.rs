//! List command
//!
//! Usage: codeshelf list [--favorites] [--lang <LANG>] [--search <TEXT>] [--json]

use clap::Args;
use codeshelf_core::{list_snippets, ExError, SnippetFilters, SnippetStore};

use super::{render, CliError};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only favorites
    #[arg(long)]
    pub favorites: bool,

    /// Exact language tag
    #[arg(long = "lang")]
    pub language: Option<String>,

    /// Text contained in the title or the code
    #[arg(long)]
    pub search: Option<String>,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    fn filters(&self) -> SnippetFilters {
        SnippetFilters {
            favorites_only: self.favorites,
            language: self.language.clone(),
            search: self.search.clone(),
        }
    }
}

/// Execute list command
pub fn execute<S: SnippetStore>(store: &mut S, args: ListArgs) -> Result<(), CliError> {
    let listing = list_snippets(store, &args.filters())?;

    if args.json {
        let json = serde_json::to_string_pretty(&listing).map_err(ExError::from)?;
        println!("{}", json);
    } else {
        print!("{}", render::listing(&listing));
    }

    Ok(())
}
