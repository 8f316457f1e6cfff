//! Plain-text rendering of snippets and listings

use codeshelf_core::{ShelfError, Snippet, SnippetListing};

/// One line per snippet: id, favorite star, title, language tag
pub fn listing(listing: &SnippetListing) -> String {
    let mut out = String::new();
    if let Some(label) = &listing.active_filter {
        out.push_str(&format!("Filter: {}\n", label));
    }
    if listing.snippets.is_empty() {
        out.push_str("No snippets found.\n");
        return out;
    }
    for snippet in &listing.snippets {
        out.push_str(&summary_line(snippet));
        out.push('\n');
    }
    out
}

fn summary_line(snippet: &Snippet) -> String {
    let star = if snippet.is_favorite { '*' } else { ' ' };
    if snippet.language.is_empty() {
        format!("{:>4} {} {}", snippet.id, star, snippet.title)
    } else {
        format!("{:>4} {} {} [{}]", snippet.id, star, snippet.title, snippet.language)
    }
}

/// Full details view
pub fn details(snippet: &Snippet) -> String {
    format!(
        "#{} {}\nlanguage: {}\nfavorite: {}\n\n{}\n",
        snippet.id,
        snippet.title,
        snippet.language,
        if snippet.is_favorite { "yes" } else { "no" },
        snippet.code
    )
}

/// Field errors, one per line, prefixed with the field name
pub fn validation_errors(errors: &[ShelfError]) -> String {
    errors
        .iter()
        .map(|err| match err.field() {
            Some(field) => format!("{}: {}", field, err),
            None => err.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
