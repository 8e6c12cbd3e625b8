//! Miette diagnostics for catalog and plural-expression errors.
//!
//! Fields are read by the miette derive macros, which rustc cannot track.
#![expect(unused_assignments)]

use std::path::Path;

use jstrans::{PluralError, PoError};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A syntax error in a `.po` or JSON catalog, pointing into the file.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(jstrans::catalog))]
pub struct CatalogDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl CatalogDiagnostic {
    /// Create a diagnostic from a PO reader error.
    pub fn from_po_error(path: &Path, content: &str, err: &PoError) -> Self {
        let (line, column, help) = match err {
            PoError::Syntax { line, column, .. } => (*line, *column, None),
            PoError::IndexOutOfOrder { line, expected, .. } => (
                *line,
                1,
                Some(format!("the next plural form is msgstr[{expected}]")),
            ),
            PoError::DuplicateMessage { line, .. } => (
                *line,
                1,
                Some("merge the entries or give one a msgctxt".to_string()),
            ),
        };
        CatalogDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (line_offset(content, line, column), 1).into(),
            message: err.to_string(),
            help,
        }
    }

    /// Create a diagnostic from a JSON catalog deserialization error.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        CatalogDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (line_offset(content, err.line(), err.column()), 1).into(),
            message: format!("invalid catalog: {err}"),
            help: Some(
                "expected {\"metadata\": ..., \"messages\": [{\"msgid\": ..., \"msgstr\": ...}]}"
                    .to_string(),
            ),
        }
    }
}

/// An invalid plural-forms expression, pointing at the offending column.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(jstrans::plural))]
pub struct ExpressionDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    label: String,

    message: String,

    #[help]
    help: Option<String>,
}

impl ExpressionDiagnostic {
    /// Create a diagnostic for `expression`, named `name` in the report.
    pub fn from_plural_error(name: &str, expression: &str, err: &PluralError) -> Self {
        let (span, label, help): (SourceSpan, String, Option<String>) = match err {
            PluralError::ExpressionTooLong { limit, .. } => (
                (0, expression.len()).into(),
                "expression".to_string(),
                Some(format!("plural expressions are limited to {limit} characters")),
            ),
            PluralError::InvalidExpression { column, message } => (
                (line_offset(expression, 1, *column), 1).into(),
                message.clone(),
                Some(
                    "only n, integers, parentheses, ?:, ||, &&, comparisons, \
                     + - * / % and ! are allowed"
                        .to_string(),
                ),
            ),
        };
        ExpressionDiagnostic {
            src: NamedSource::new(name, expression.to_string()),
            span,
            label,
            message: err.to_string(),
            help,
        }
    }
}

/// Byte offset of a 1-based `line`:`column` position, clamped to the content.
///
/// Columns count characters.
fn line_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>()
        .min(content.len());
    let column_offset = content[line_start..]
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(content.len() - line_start, |(offset, _)| offset);
    line_start + column_offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_count_lines_and_characters() {
        let content = "ab\nçd\n";
        assert_eq!(line_offset(content, 1, 1), 0);
        assert_eq!(line_offset(content, 2, 1), 3);
        assert_eq!(line_offset(content, 2, 2), 5);
        assert_eq!(line_offset(content, 9, 9), content.len());
    }
}
