//! Free-text list inputs.
//!
//! Tag and product-id fields are typed by the author as comma separated text.
//! The text stays the source of truth; these functions derive the lists from
//! it on every read. Malformed tokens are dropped silently so a half-typed
//! value never blocks the form.

/// Split `text` on commas into trimmed, non-empty tags.
///
/// Order is preserved; case and duplicates are left untouched.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Split `text` on commas into integers, skipping tokens that do not parse.
pub fn parse_ids(text: &str) -> Vec<i64> {
    text.split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect()
}

/// Render a list back into the text form accepted by the parsers.
pub fn join_list<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
