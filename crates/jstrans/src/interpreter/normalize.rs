//! Catalog normalization.
//!
//! Reshapes a raw catalog, where plural messages are keyed by
//! `(singular, plural)` pairs, into a lookup keyed by singular text alone.

use std::collections::BTreeMap;

use bon::Builder;
use tracing::debug;

use crate::interpreter::CatalogError;
use crate::types::{CatalogEntry, MessageKey, NormalizedCatalog, RawCatalog, Translation};

/// Normalizes raw catalogs.
///
/// When `nplurals` is set, every plural entry must carry exactly that many
/// forms.
///
/// # Example
///
/// ```
/// use jstrans::{MessageKey, Normalizer, RawCatalog};
///
/// let mut raw = RawCatalog::new();
/// raw.insert(MessageKey::pair("apple", "apples"), ["pomme", "pommes"]);
///
/// let normalizer = Normalizer::builder().nplurals(2).build();
/// let catalog = normalizer.normalize(&raw).unwrap();
/// assert_eq!(catalog.get("apple").and_then(|e| e.form(1)), Some("pommes"));
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct Normalizer {
    /// Expected number of forms per plural entry.
    nplurals: Option<usize>,
}

/// Normalize a raw catalog without a plural-count check.
///
/// # Errors
///
/// Returns [`CatalogError::MalformedEntry`] for entries whose value does not
/// fit their key.
pub fn normalize(raw: &RawCatalog) -> Result<NormalizedCatalog, CatalogError> {
    Normalizer::default().normalize(raw)
}

impl Normalizer {
    /// Normalize `raw`.
    ///
    /// Plural entries win over singular entries with the same text, whatever
    /// order they appear in. The empty msgid (the catalog header) is not a
    /// message and is left out.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedEntry`] for:
    /// - a pair key with a single translation or no forms,
    /// - a singular key with plural forms,
    /// - a plural entry whose form count differs from `nplurals`.
    pub fn normalize(&self, raw: &RawCatalog) -> Result<NormalizedCatalog, CatalogError> {
        let mut entries: BTreeMap<String, CatalogEntry> = BTreeMap::new();

        for (key, translation) in raw {
            let MessageKey::Pair { singular, .. } = key else {
                continue;
            };
            let forms = self.plural_forms(key, translation)?;
            let slot = entries
                .entry(singular.clone())
                .or_insert_with(|| CatalogEntry::Plural(BTreeMap::new()));
            if let CatalogEntry::Plural(existing) = slot {
                existing.extend(forms.iter().cloned().enumerate());
            }
        }

        for (key, translation) in raw {
            let MessageKey::Singular(text) = key else {
                continue;
            };
            if text.is_empty() {
                continue;
            }
            let Translation::Single(value) = translation else {
                return Err(malformed(key, "singular message has plural forms"));
            };
            if entries.contains_key(text) {
                debug!(msgid = %text, "plural entry shadows singular entry");
                continue;
            }
            entries.insert(text.clone(), CatalogEntry::Simple(value.clone()));
        }

        let catalog = NormalizedCatalog::from_entries(entries);
        debug!(
            entries = catalog.len(),
            plurals = catalog.plural_count(),
            "normalized catalog"
        );
        Ok(catalog)
    }

    fn plural_forms<'a>(
        &self,
        key: &MessageKey,
        translation: &'a Translation,
    ) -> Result<&'a [String], CatalogError> {
        let Translation::Forms(forms) = translation else {
            return Err(malformed(key, "plural message has a single translation"));
        };
        if forms.is_empty() {
            return Err(malformed(key, "plural message has no forms"));
        }
        if let Some(expected) = self.nplurals {
            if forms.len() != expected {
                return Err(malformed(
                    key,
                    format!("expected {expected} plural forms, found {}", forms.len()),
                ));
            }
        }
        Ok(forms)
    }
}

fn malformed(key: &MessageKey, reason: impl Into<String>) -> CatalogError {
    CatalogError::MalformedEntry {
        msgid: key.singular_text().to_string(),
        reason: reason.into(),
    }
}
