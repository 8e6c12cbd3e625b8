//! Error types for formatting and catalog normalization.

use strsim::levenshtein;
use thiserror::Error;

/// An error raised while formatting a message.
///
/// These are lookup-time failures: they affect only the call that raised
/// them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A directive names a variable that was not supplied.
    #[error("format variable '{name}' doesn't exist{}", format_suggestions(suggestions))]
    MissingVariable {
        name: String,
        suggestions: Vec<String>,
    },

    /// A directive uses a type letter other than `s`, `d`, or `f`.
    #[error("unknown formatting specifier '{letter}'")]
    UnknownSpecifier { letter: char },

    /// A directive's width is larger than [`MAX_FORMAT_WIDTH`].
    ///
    /// [`MAX_FORMAT_WIDTH`]: crate::parser::MAX_FORMAT_WIDTH
    #[error("format width {width} for '{name}' exceeds the limit of {limit}")]
    WidthTooLarge {
        name: String,
        width: String,
        limit: usize,
    },
}

/// A data-quality error in a raw catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// An entry whose value does not fit its key.
    #[error("malformed catalog entry '{msgid}': {reason}")]
    MalformedEntry { msgid: String, reason: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute "did you mean" candidates for a missing name.
///
/// Returns at most three candidates within a small edit distance, closest
/// first.
pub fn compute_suggestions<'a>(
    name: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            (dist > 0 && dist <= max_distance).then_some((dist, candidate))
        })
        .collect();

    suggestions.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}
