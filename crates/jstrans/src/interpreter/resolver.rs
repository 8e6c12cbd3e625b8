//! Message lookup: the `gettext`/`ngettext` contract.

use std::borrow::Cow;
use std::collections::HashMap;

use bon::Builder;

use crate::interpreter::FormatError;
use crate::interpreter::formatter::format;
use crate::interpreter::plural::{PluralRule, default_plural_index};
use crate::types::{CatalogEntry, NormalizedCatalog, Value};

/// Name under which `ngettext` binds the count for templates.
pub const COUNT_VARIABLE: &str = "n";

/// Resolves and formats messages against a normalized catalog.
///
/// The resolver holds no mutable state: every lookup is a pure function of
/// the catalog, the plural rule, and the call's arguments, so a failed call
/// leaves later calls unaffected and the resolver can be shared across
/// threads.
///
/// # Example
///
/// ```
/// use jstrans::{MessageKey, MessageResolver, PluralRule, RawCatalog, normalize, params};
///
/// let mut raw = RawCatalog::new();
/// raw.insert(MessageKey::singular("Hello"), "Bonjour");
/// raw.insert(
///     MessageKey::pair("%(num)d item", "%(num)d items"),
///     ["%(num)d objet", "%(num)d objets"],
/// );
///
/// let resolver = MessageResolver::builder()
///     .catalog(normalize(&raw).unwrap())
///     .plural_rule(PluralRule::compile("n > 1").unwrap())
///     .build();
///
/// assert_eq!(resolver.gettext("Hello", &params! {}).unwrap(), "Bonjour");
/// assert_eq!(
///     resolver
///         .ngettext("%(num)d item", "%(num)d items", 5, &params! { "num" => 5 })
///         .unwrap(),
///     "5 objets"
/// );
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct MessageResolver {
    /// Translations keyed by singular source text.
    #[builder(default)]
    catalog: NormalizedCatalog,

    /// The catalog's compiled plural rule, if it declared one.
    plural_rule: Option<PluralRule>,
}

impl MessageResolver {
    /// Create a resolver from a catalog and an optional plural rule.
    pub fn new(catalog: NormalizedCatalog, plural_rule: Option<PluralRule>) -> Self {
        MessageResolver {
            catalog,
            plural_rule,
        }
    }

    /// The normalized catalog.
    pub fn catalog(&self) -> &NormalizedCatalog {
        &self.catalog
    }

    /// The compiled plural rule, if any.
    pub fn plural_rule(&self) -> Option<&PluralRule> {
        self.plural_rule.as_ref()
    }

    /// Format a template without any catalog lookup.
    pub fn format(
        &self,
        text: &str,
        bindings: &HashMap<String, Value>,
    ) -> Result<String, FormatError> {
        format(text, bindings)
    }

    /// Translate `text` and format it with `bindings`.
    ///
    /// Untranslated messages, and messages that only exist in plural form,
    /// format the source text itself.
    pub fn gettext(
        &self,
        text: &str,
        bindings: &HashMap<String, Value>,
    ) -> Result<String, FormatError> {
        match self.catalog.get(text) {
            Some(CatalogEntry::Simple(translated)) => format(translated, bindings),
            Some(CatalogEntry::Plural(_)) | None => format(text, bindings),
        }
    }

    /// Translate a pluralizable message for count `n`.
    ///
    /// The catalog's plural rule (or `n == 1 ? 0 : 1` when there is none)
    /// picks the translated form. When the catalog has no form at that index,
    /// the same index, clamped to 1, chooses between `text` and
    /// `text_plural`.
    ///
    /// Templates may reference the count as `%(n)d`; a caller-supplied `n`
    /// binding takes precedence.
    pub fn ngettext(
        &self,
        text: &str,
        text_plural: &str,
        n: u64,
        bindings: &HashMap<String, Value>,
    ) -> Result<String, FormatError> {
        let bindings = with_count(bindings, n);
        let index = self.plural_index(n);

        if let Some(translated) = self.catalog.get(text).and_then(|entry| entry.form(index)) {
            return format(translated, &bindings);
        }

        let source = match index.min(1) {
            0 => text,
            _ => text_plural,
        };
        format(source, &bindings)
    }

    /// The plural-form index the catalog uses for `n`.
    pub fn plural_index(&self, n: u64) -> usize {
        self.plural_rule
            .as_ref()
            .map_or_else(|| default_plural_index(n), |rule| rule.index(n))
    }
}

fn with_count(bindings: &HashMap<String, Value>, n: u64) -> Cow<'_, HashMap<String, Value>> {
    if bindings.contains_key(COUNT_VARIABLE) {
        Cow::Borrowed(bindings)
    } else {
        let mut extended = bindings.clone();
        extended.insert(COUNT_VARIABLE.to_string(), Value::from(n));
        Cow::Owned(extended)
    }
}
