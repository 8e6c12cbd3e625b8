//! Integration tests for catalog normalization.

use std::collections::BTreeMap;

use jstrans::{
    CatalogEntry, CatalogError, MessageKey, NormalizedCatalog, Normalizer, RawCatalog, Translation,
    normalize,
};
use proptest::prelude::*;

fn forms(values: &[&str]) -> CatalogEntry {
    CatalogEntry::Plural(
        values
            .iter()
            .enumerate()
            .map(|(index, value)| (index, (*value).to_string()))
            .collect(),
    )
}

// =============================================================================
// Shape
// =============================================================================

#[test]
fn singular_and_plural_entries() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::singular("Hello"), "Bonjour");
    raw.insert(MessageKey::pair("apple", "apples"), ["pomme", "pommes"]);

    let catalog = normalize(&raw).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get("Hello"),
        Some(&CatalogEntry::Simple("Bonjour".into()))
    );
    assert_eq!(catalog.get("apple"), Some(&forms(&["pomme", "pommes"])));
    assert_eq!(catalog.get("apples"), None);
    assert_eq!(catalog.plural_count(), 1);
}

#[test]
fn merge_example() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::singular("Hello"), "Bonjour");
    raw.insert(
        MessageKey::pair("%(num)d item", "%(num)d items"),
        ["%(num)d objet", "%(num)d objets"],
    );

    let expected: BTreeMap<String, CatalogEntry> = [
        ("Hello".to_string(), CatalogEntry::Simple("Bonjour".into())),
        (
            "%(num)d item".to_string(),
            forms(&["%(num)d objet", "%(num)d objets"]),
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        normalize(&raw).unwrap(),
        NormalizedCatalog::from_entries(expected)
    );
}

#[test]
fn empty_catalog() {
    let catalog = normalize(&RawCatalog::new()).unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn header_msgid_is_not_a_message() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::singular(""), "Content-Type: text/plain\n");
    raw.insert(MessageKey::singular("Yes"), "Oui");

    let catalog = normalize(&raw).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(""), None);
}

#[test]
fn pairs_sharing_a_singular_are_merged_by_index() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::pair("file", "files"), ["fichier", "fichiers"]);
    raw.insert(
        MessageKey::pair("file", "file(s)"),
        ["fichier (a)", "fichiers (b)", "fichiers (c)"],
    );

    let catalog = normalize(&raw).unwrap();
    let Some(CatalogEntry::Plural(merged)) = catalog.get("file") else {
        panic!("expected plural entry");
    };
    assert_eq!(merged.len(), 3);
    assert_eq!(merged.get(&2).map(String::as_str), Some("fichiers (c)"));
}

#[test]
fn plural_entry_wins_over_singular() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::singular("day"), "jour");
    raw.insert(MessageKey::pair("day", "days"), ["jour", "jours"]);

    let catalog = normalize(&raw).unwrap();
    assert_eq!(catalog.get("day"), Some(&forms(&["jour", "jours"])));
}

#[test]
fn plural_entry_wins_regardless_of_insertion_order() {
    let entries = [
        (MessageKey::pair("day", "days"), Translation::from(["jour", "jours"])),
        (MessageKey::singular("day"), Translation::from("jour")),
    ];
    let forward: RawCatalog = entries.clone().into_iter().collect();
    let backward: RawCatalog = entries.into_iter().rev().collect();

    assert_eq!(normalize(&forward).unwrap(), normalize(&backward).unwrap());
}

#[test]
fn serializes_plural_indices_as_keys() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::singular("Hello"), "Bonjour");
    raw.insert(MessageKey::pair("apple", "apples"), ["pomme", "pommes"]);

    let json = serde_json::to_string(&normalize(&raw).unwrap()).unwrap();
    insta::assert_snapshot!(json, @r#"{"Hello":"Bonjour","apple":{"0":"pomme","1":"pommes"}}"#);
}

// =============================================================================
// Malformed entries
// =============================================================================

#[test]
fn pair_with_single_translation_is_malformed() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::pair("apple", "apples"), "pomme");

    let err = normalize(&raw).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"malformed catalog entry 'apple': plural message has a single translation");
}

#[test]
fn pair_without_forms_is_malformed() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::pair("apple", "apples"), Vec::<String>::new());

    assert!(matches!(
        normalize(&raw),
        Err(CatalogError::MalformedEntry { .. })
    ));
}

#[test]
fn singular_with_forms_is_malformed() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::singular("apple"), ["pomme", "pommes"]);

    let err = normalize(&raw).unwrap_err();
    let CatalogError::MalformedEntry { msgid, reason } = err;
    assert_eq!(msgid, "apple");
    assert_eq!(reason, "singular message has plural forms");
}

#[test]
fn form_count_must_match_nplurals() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::pair("apple", "apples"), ["pomme", "pommes"]);

    let three = Normalizer::builder().nplurals(3).build();
    let err = three.normalize(&raw).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"malformed catalog entry 'apple': expected 3 plural forms, found 2");

    let two = Normalizer::builder().nplurals(2).build();
    assert!(two.normalize(&raw).is_ok());
}

#[test]
fn nplurals_does_not_constrain_singular_entries() {
    let mut raw = RawCatalog::new();
    raw.insert(MessageKey::singular("Hello"), "Bonjour");

    let normalizer = Normalizer::builder().nplurals(3).build();
    assert_eq!(normalizer.normalize(&raw).unwrap().len(), 1);
}

// =============================================================================
// Properties
// =============================================================================

fn raw_catalog() -> impl Strategy<Value = RawCatalog> {
    let singular = ("[a-e]{1,3}", "[A-Z]{1,4}")
        .prop_map(|(text, value)| (MessageKey::singular(text), Translation::Single(value)));
    let pair = ("[a-e]{1,3}", prop::collection::vec("[A-Z]{1,4}", 2..=2)).prop_map(
        |(text, values)| {
            let plural = format!("{text}s");
            (MessageKey::pair(text, plural), Translation::Forms(values))
        },
    );
    prop::collection::vec(prop_oneof![singular, pair], 0..12)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in raw_catalog()) {
        let once = normalize(&raw).unwrap();
        let twice = normalize(&once.to_raw()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_singular_text_is_present(raw in raw_catalog()) {
        let catalog = normalize(&raw).unwrap();
        let expected: BTreeMap<&str, bool> = raw
            .iter()
            .map(|(key, _)| (key.singular_text(), matches!(key, MessageKey::Pair { .. })))
            .fold(BTreeMap::new(), |mut acc, (text, plural)| {
                *acc.entry(text).or_insert(false) |= plural;
                acc
            });
        prop_assert_eq!(catalog.len(), expected.len());
        for (text, plural) in expected {
            let entry = catalog.get(text);
            prop_assert!(entry.is_some());
            prop_assert_eq!(matches!(entry, Some(CatalogEntry::Plural(_))), plural);
        }
    }
}
