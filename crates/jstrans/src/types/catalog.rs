//! Catalog data types: raw gettext messages and their normalized form.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// The key a translation is stored under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKey {
    /// A message without plural forms: `msgid`.
    Singular(String),
    /// A pluralizable message: `msgid` + `msgid_plural`.
    Pair { singular: String, plural: String },
}

impl MessageKey {
    /// Create a singular key.
    pub fn singular(text: impl Into<String>) -> Self {
        MessageKey::Singular(text.into())
    }

    /// Create a singular/plural pair key.
    pub fn pair(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        MessageKey::Pair {
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    /// The singular source text, which is the lookup key at runtime.
    pub fn singular_text(&self) -> &str {
        match self {
            MessageKey::Singular(text) => text,
            MessageKey::Pair { singular, .. } => singular,
        }
    }
}

/// A translation value as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Translation {
    /// A single translated string.
    Single(String),
    /// Plural forms, indexed by plural-form index.
    Forms(Vec<String>),
}

impl From<&str> for Translation {
    fn from(s: &str) -> Self {
        Translation::Single(s.to_string())
    }
}

impl From<String> for Translation {
    fn from(s: String) -> Self {
        Translation::Single(s)
    }
}

impl From<Vec<String>> for Translation {
    fn from(forms: Vec<String>) -> Self {
        Translation::Forms(forms)
    }
}

impl<const N: usize> From<[&str; N]> for Translation {
    fn from(forms: [&str; N]) -> Self {
        Translation::Forms(forms.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Raw catalog: message keys mapped to translations, exactly as the catalog
/// source provides them.
///
/// Entries are kept in key order so every consumer sees the same sequence
/// regardless of how the catalog was assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCatalog {
    entries: BTreeMap<MessageKey, Translation>,
}

impl RawCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a translation, replacing any previous value for the same key.
    pub fn insert(&mut self, key: MessageKey, translation: impl Into<Translation>) {
        self.entries.insert(key, translation.into());
    }

    /// Look up the translation stored for a key.
    pub fn get(&self, key: &MessageKey) -> Option<&Translation> {
        self.entries.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, MessageKey, Translation> {
        self.entries.iter()
    }
}

impl FromIterator<(MessageKey, Translation)> for RawCatalog {
    fn from_iter<I: IntoIterator<Item = (MessageKey, Translation)>>(iter: I) -> Self {
        RawCatalog {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RawCatalog {
    type Item = (&'a MessageKey, &'a Translation);
    type IntoIter = btree_map::Iter<'a, MessageKey, Translation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A normalized catalog value.
///
/// Serializes as a bare string (`Simple`) or as an object keyed by decimal
/// plural index (`Plural`), which is the shape the JavaScript runtime reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    /// Translation of a message without plural forms.
    Simple(String),
    /// Plural forms keyed by plural index.
    Plural(BTreeMap<usize, String>),
}

impl CatalogEntry {
    /// The plural form at `index`, if this is a plural entry that has one.
    pub fn form(&self, index: usize) -> Option<&str> {
        match self {
            CatalogEntry::Simple(_) => None,
            CatalogEntry::Plural(forms) => forms.get(&index).map(String::as_str),
        }
    }
}

/// Uniform lookup structure keyed by singular source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl NormalizedCatalog {
    /// Wrap an already-normalized map.
    pub fn from_entries(entries: BTreeMap<String, CatalogEntry>) -> Self {
        NormalizedCatalog { entries }
    }

    /// Look up the entry for a singular source text.
    pub fn get(&self, text: &str) -> Option<&CatalogEntry> {
        self.entries.get(text)
    }

    /// Number of distinct singular keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries carrying plural forms.
    pub fn plural_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, CatalogEntry::Plural(_)))
            .count()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, CatalogEntry> {
        self.entries.iter()
    }

    /// Re-express this catalog as raw entries.
    ///
    /// The plural source text is not retained by normalization, so pair keys
    /// reuse the singular text in the plural slot. Only indices present in the
    /// entry are emitted, which is every index from 0 for catalogs produced by
    /// the normalizer.
    pub fn to_raw(&self) -> RawCatalog {
        self.entries
            .iter()
            .map(|(text, entry)| match entry {
                CatalogEntry::Simple(s) => {
                    (MessageKey::singular(text.clone()), Translation::Single(s.clone()))
                }
                CatalogEntry::Plural(forms) => (
                    MessageKey::pair(text.clone(), text.clone()),
                    Translation::Forms(forms.values().cloned().collect()),
                ),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a NormalizedCatalog {
    type Item = (&'a String, &'a CatalogEntry);
    type IntoIter = btree_map::Iter<'a, String, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A catalog as delivered by the catalog source: metadata header plus raw
/// messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// The header entry (translation of the empty msgid).
    pub metadata: String,
    /// All messages except the header.
    pub raw: RawCatalog,
}

/// JSON form of a [`Catalog`].
///
/// ```json
/// {
///   "metadata": "Plural-Forms: nplurals=2; plural=(n > 1);",
///   "messages": [
///     { "msgid": "Hello", "msgstr": "Bonjour" },
///     { "msgid": "%(num)d item", "msgid_plural": "%(num)d items",
///       "msgstr": ["%(num)d objet", "%(num)d objets"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub metadata: String,
    #[serde(default)]
    pub messages: Vec<CatalogMessage>,
}

/// One message of a [`CatalogFile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMessage {
    pub msgid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msgid_plural: Option<String>,
    pub msgstr: Translation,
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        let raw = file
            .messages
            .into_iter()
            .map(|message| {
                let key = match message.msgid_plural {
                    Some(plural) => MessageKey::pair(message.msgid, plural),
                    None => MessageKey::singular(message.msgid),
                };
                (key, message.msgstr)
            })
            .collect();
        Catalog {
            metadata: file.metadata,
            raw,
        }
    }
}
