//! Build-time errors for artifact generation.

use thiserror::Error;

use crate::interpreter::CatalogError;
use crate::parser::PluralError;

/// An error that aborts artifact generation.
///
/// No partial artifact is produced when any stage fails.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The catalog's plural-forms expression did not compile.
    #[error("plural rule: {0}")]
    Plural(#[from] PluralError),

    /// The raw catalog holds a malformed entry.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The configured namespace is not a usable JavaScript identifier.
    #[error("invalid namespace '{0}': expected a JavaScript identifier")]
    InvalidNamespace(String),

    /// Embedding the catalog as JSON failed.
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}
