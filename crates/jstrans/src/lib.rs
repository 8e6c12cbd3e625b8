//! Compile gettext catalogs into self-contained JavaScript runtimes.
//!
//! A catalog (messages plus its `Plural-Forms` header) is normalized, its
//! plural rule is compiled into an inert expression tree, and both are
//! embedded with a small lookup runtime exposing `format`, `gettext`, and
//! `ngettext`. The same semantics are available natively through
//! [`MessageResolver`].

pub mod compiler;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use compiler::{
    Artifact, ArtifactCache, CONTENT_TYPE, CatalogCompiler, CompileError, CompilerOptions,
    DEFAULT_NAMESPACE, ScriptFlavor,
};
pub use interpreter::{
    CatalogError, FormatError, MessageResolver, Normalizer, PluralRule, format, normalize,
};
pub use parser::{PluralError, PoError, parse_po};
pub use types::{
    Catalog, CatalogEntry, CatalogFile, CatalogMessage, MessageKey, NormalizedCatalog, RawCatalog,
    Translation, Value,
};

/// Creates a `HashMap<String, Value>` of format bindings from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, and strings
/// can be passed directly.
///
/// # Example
///
/// ```
/// use jstrans::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p["count"].as_integer(), Some(3));
/// assert_eq!(p["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
