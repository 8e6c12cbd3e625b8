//! Parse error types.

use thiserror::Error;

/// An error that occurred while reading a `.po` catalog.
#[derive(Debug, Error)]
pub enum PoError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A `msgstr[N]` index that does not follow the previous one.
    #[error("msgstr index {index} out of order at line {line}, expected {expected}")]
    IndexOutOfOrder {
        line: usize,
        index: usize,
        expected: usize,
    },

    /// The same message appears twice.
    #[error("duplicate message '{msgid}' at line {line}")]
    DuplicateMessage { line: usize, msgid: String },
}

/// An error that occurred while compiling a plural-forms expression.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluralError {
    /// The expression exceeds the length limit; nothing was parsed.
    #[error("plural form expression is too long ({length} > {limit} characters)")]
    ExpressionTooLong { length: usize, limit: usize },

    /// The expression is not part of the plural-forms grammar.
    #[error("invalid plural expression at column {column}: {message}")]
    InvalidExpression { column: usize, message: String },
}

/// Calculate line and column from original input and remaining input.
pub(crate) fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}
