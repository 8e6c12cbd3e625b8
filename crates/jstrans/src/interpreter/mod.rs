//! Runtime semantics: formatting, plural rules, normalization, and lookup.
//!
//! Everything here is pure and immutable after construction. The compiled
//! JavaScript runtime implements the same behavior in the browser.

mod error;
mod formatter;
mod normalize;
pub mod number;
mod plural;
mod resolver;

pub use error::{CatalogError, FormatError, compute_suggestions};
pub use formatter::{format, render};
pub use normalize::{Normalizer, normalize};
pub use plural::{PluralRule, default_plural_index};
pub use resolver::{COUNT_VARIABLE, MessageResolver};
