//! Catalog header parsing.
//!
//! The header is the translation of the empty msgid: `Key: value` lines such
//! as `Plural-Forms: nplurals=3; plural=(n==1 ? 0 : n<5 ? 1 : 2);`.

/// The `Plural-Forms` header of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PluralForms {
    /// Declared number of plural forms.
    pub nplurals: Option<usize>,
    /// Source of the plural expression, without the trailing `;`.
    pub expression: Option<String>,
}

/// Extract the `Plural-Forms` header from catalog metadata.
///
/// The key is matched case-insensitively and the line is lowercased, so `N`
/// reads as `n`. The expression is the text after `plural=` up to the first
/// `;` (or the end of the line). Returns `None` when no such line exists.
///
/// # Example
///
/// ```
/// use jstrans::parser::parse_plural_forms;
///
/// let header = "Language: fr\nPlural-Forms: nplurals=2; plural=(n > 1);\n";
/// let forms = parse_plural_forms(header).unwrap();
/// assert_eq!(forms.nplurals, Some(2));
/// assert_eq!(forms.expression.as_deref(), Some("(n > 1)"));
/// ```
pub fn parse_plural_forms(metadata: &str) -> Option<PluralForms> {
    let line = metadata
        .lines()
        .map(|line| line.trim().to_ascii_lowercase())
        .find(|line| line.starts_with("plural-forms:"))?;

    Some(PluralForms {
        nplurals: parameter(&line, "nplurals=").and_then(|value| value.parse().ok()),
        expression: parameter(&line, "plural=").map(str::to_string),
    })
}

/// The value of `name` in a `;`-separated parameter list.
fn parameter<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let start = find_parameter(line, name)? + name.len();
    let rest = &line[start..];
    let value = rest.split(';').next().unwrap_or(rest).trim();
    (!value.is_empty()).then_some(value)
}

/// Position of the first `name` that starts a word.
fn find_parameter(line: &str, name: &str) -> Option<usize> {
    line.match_indices(name)
        .map(|(index, _)| index)
        .find(|&index| {
            line[..index]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(parse_plural_forms("Language: de\n"), None);
    }

    #[test]
    fn expression_without_semicolon_runs_to_end_of_line() {
        let forms = parse_plural_forms("plural-forms: nplurals=2; plural=n != 1").unwrap();
        assert_eq!(forms.expression.as_deref(), Some("n != 1"));
    }

    #[test]
    fn header_without_expression() {
        let forms = parse_plural_forms("Plural-Forms: nplurals=1;").unwrap();
        assert_eq!(forms.nplurals, Some(1));
        assert_eq!(forms.expression, None);
    }
}
