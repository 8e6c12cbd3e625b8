//! Parsers for format strings, plural-forms expressions, catalog headers, and
//! `.po` files.
//!
//! The parsers produce plain data (ASTs and catalogs) that the interpreter and
//! compiler consume, and that external tooling can inspect.

pub mod ast;
pub mod error;
mod format;
mod metadata;
mod plural;
mod po;

pub use ast::*;
pub use error::{PluralError, PoError};
pub use format::{MAX_FORMAT_WIDTH, parse_format};
pub use metadata::{PluralForms, parse_plural_forms};
pub use plural::{MAX_EXPRESSION_LENGTH, parse_plural};
pub use po::parse_po;
