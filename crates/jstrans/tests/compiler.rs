//! Integration tests for artifact compilation and caching.

use std::sync::Arc;

use jstrans::{
    ArtifactCache, CONTENT_TYPE, Catalog, CatalogCompiler, CatalogEntry, CatalogError,
    CatalogFile, CompileError, CompilerOptions, MessageKey, PluralError, ScriptFlavor, params,
    parse_po,
};

fn french() -> Catalog {
    let mut catalog = Catalog {
        metadata: "Language: fr\nPlural-Forms: nplurals=2; plural=(n > 1);\n".to_string(),
        ..Catalog::default()
    };
    catalog.raw.insert(MessageKey::singular("Hello"), "Bonjour");
    catalog.raw.insert(
        MessageKey::pair("%(num)d item", "%(num)d items"),
        ["%(num)d objet", "%(num)d objets"],
    );
    catalog
}

fn compact() -> CatalogCompiler {
    CatalogCompiler::new(CompilerOptions::builder().pretty(false).build())
}

// =============================================================================
// Artifact structure
// =============================================================================

#[test]
fn artifact_has_javascript_content_type() {
    let artifact = CatalogCompiler::default().compile(&french()).unwrap();
    assert_eq!(artifact.content_type, CONTENT_TYPE);
    assert_eq!(artifact.content_type, "text/javascript");
}

#[test]
fn artifact_binds_default_namespace() {
    let body = CatalogCompiler::default().compile(&french()).unwrap().body;
    assert!(body.starts_with("\"use strict\";\n\nvar babel = (function () {\n"));
    assert!(body.contains("function format(text, variables)"));
    assert!(body.contains("function gettext(text, variables)"));
    assert!(body.contains("function ngettext(text, textPlural, n, variables)"));
    assert!(body.trim_end().ends_with("})();"));
    assert!(!body.contains("export"));
}

#[test]
fn artifact_embeds_normalized_catalog() {
    let body = compact().compile(&french()).unwrap().body;
    assert!(body.contains(
        r#"var catalog = {"%(num)d item":{"0":"%(num)d objet","1":"%(num)d objets"},"Hello":"Bonjour"};"#
    ));
}

#[test]
fn artifact_embeds_plural_rule_tree() {
    let body = compact().compile(&french()).unwrap().body;
    assert!(body.contains(
        r#"var pluralRule = {"op":"binary","args":[">",{"op":"n"},{"op":"literal","args":1}]};"#
    ));
}

#[test]
fn artifact_without_plural_header_has_null_rule() {
    let mut catalog = french();
    catalog.metadata = "Language: fr\n".to_string();
    let body = compact().compile(&catalog).unwrap().body;
    assert!(body.contains("var pluralRule = null;"));
}

#[test]
fn pretty_output_indents_catalog_inside_function() {
    let body = CatalogCompiler::default().compile(&french()).unwrap().body;
    assert!(body.contains("    var catalog = {\n        \"%(num)d item\": {\n"));
    assert!(body.contains("        \"Hello\": \"Bonjour\"\n    };\n"));
}

#[test]
fn custom_namespace() {
    let compiler = CatalogCompiler::new(CompilerOptions::builder().namespace("i18n").build());
    let body = compiler.compile(&french()).unwrap().body;
    assert!(body.contains("var i18n = (function () {"));
    assert!(!body.contains("babel"));
}

#[test]
fn es_module_flavor_exports_entry_points() {
    let compiler = CatalogCompiler::new(
        CompilerOptions::builder()
            .flavor(ScriptFlavor::EsModule)
            .build(),
    );
    let body = compiler.compile(&french()).unwrap().body;
    assert!(body.contains("const babel = (function () {"));
    insta::assert_snapshot!(
        body.rsplit("})();").next().unwrap_or_default().trim(),
        @r"
    export const format = babel.format;
    export const gettext = babel.gettext;
    export const ngettext = babel.ngettext;
    export default babel;
    "
    );
}

#[test]
fn compilation_is_deterministic() {
    let compiler = CatalogCompiler::default();
    assert_eq!(
        compiler.compile(&french()).unwrap(),
        compiler.compile(&french()).unwrap()
    );
}

// =============================================================================
// Embedding safety
// =============================================================================

#[test]
fn script_closing_tag_is_escaped() {
    let mut catalog = Catalog::default();
    catalog
        .raw
        .insert(MessageKey::singular("</script><b>"), "</script><i>");
    let body = compact().compile(&catalog).unwrap().body;
    assert!(!body.contains("</script>"));
    assert!(body.contains(r#""<\/script><b>":"<\/script><i>""#));
}

#[test]
fn line_separators_are_escaped() {
    let mut catalog = Catalog::default();
    catalog
        .raw
        .insert(MessageKey::singular("a\u{2028}b"), "c\u{2029}d");
    let body = compact().compile(&catalog).unwrap().body;
    assert!(!body.contains('\u{2028}'));
    assert!(!body.contains('\u{2029}'));
    assert!(body.contains(r#""a\u2028b":"c\u2029d""#));
}

#[test]
fn injection_attempt_in_plural_header_is_rejected() {
    let mut catalog = french();
    catalog.metadata =
        "Plural-Forms: nplurals=2; plural=(n > 1) + alert(document.cookie);\n".to_string();
    let err = CatalogCompiler::default().compile(&catalog).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Plural(PluralError::InvalidExpression { .. })
    ));
}

// =============================================================================
// Build failures
// =============================================================================

#[test]
fn overlong_plural_expression_aborts_build() {
    let mut catalog = french();
    catalog.metadata = format!("Plural-Forms: nplurals=2; plural={};", "n".repeat(1001));
    let err = CatalogCompiler::default().compile(&catalog).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"plural rule: plural form expression is too long (1001 > 1000 characters)");
}

#[test]
fn malformed_entry_aborts_build() {
    let mut catalog = french();
    catalog
        .raw
        .insert(MessageKey::singular("Broken"), ["a", "b"]);
    let err = CatalogCompiler::default().compile(&catalog).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Catalog(CatalogError::MalformedEntry { .. })
    ));
}

#[test]
fn nplurals_mismatch_aborts_build() {
    let mut catalog = french();
    catalog.metadata = "Plural-Forms: nplurals=3; plural=n%3;".to_string();
    let err = CatalogCompiler::default().compile(&catalog).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"malformed catalog entry '%(num)d item': expected 3 plural forms, found 2");
}

#[test]
fn invalid_namespace_aborts_build() {
    for namespace in ["", "my-ns", "1st", "class", "ngettext", "a b"] {
        let compiler =
            CatalogCompiler::new(CompilerOptions::builder().namespace(namespace).build());
        assert!(
            matches!(
                compiler.compile(&french()),
                Err(CompileError::InvalidNamespace(_))
            ),
            "{namespace:?} should be rejected"
        );
    }
}

// =============================================================================
// Prepared resolver
// =============================================================================

#[test]
fn prepared_resolver_matches_catalog() {
    let resolver = CatalogCompiler::default().prepare(&french()).unwrap();
    assert_eq!(
        resolver.catalog().get("Hello"),
        Some(&CatalogEntry::Simple("Bonjour".into()))
    );
    assert_eq!(
        resolver
            .ngettext("%(num)d item", "%(num)d items", 2, &params! { "num" => 2 })
            .unwrap(),
        "2 objets"
    );
    assert_eq!(resolver.plural_index(1), 0);
}

#[test]
fn uppercase_count_variable_in_header_is_accepted() {
    let mut catalog = french();
    catalog.metadata = "PLURAL-FORMS: NPLURALS=2; PLURAL=(N != 1);".to_string();
    let resolver = CatalogCompiler::default().prepare(&catalog).unwrap();
    assert_eq!(resolver.plural_index(0), 1);
    assert_eq!(resolver.plural_index(1), 0);
}

#[test]
fn compiles_po_source() {
    let catalog = parse_po(
        r#"msgid ""
msgstr "Plural-Forms: nplurals=2; plural=(n != 1);\n"

msgid "Save"
msgstr "Speichern"
"#,
    )
    .unwrap();
    let body = compact().compile(&catalog).unwrap().body;
    assert!(body.contains(r#"var catalog = {"Save":"Speichern"};"#));
}

#[test]
fn compiles_json_catalog_file() {
    let file: CatalogFile = serde_json::from_str(
        r#"{
            "metadata": "Plural-Forms: nplurals=2; plural=(n > 1);",
            "messages": [
                { "msgid": "Hello", "msgstr": "Bonjour" },
                { "msgid": "%(n)d cat", "msgid_plural": "%(n)d cats",
                  "msgstr": ["%(n)d chat", "%(n)d chats"] }
            ]
        }"#,
    )
    .unwrap();
    let resolver = CatalogCompiler::default()
        .prepare(&Catalog::from(file))
        .unwrap();
    assert_eq!(
        resolver
            .ngettext("%(n)d cat", "%(n)d cats", 4, &params! {})
            .unwrap(),
        "4 chats"
    );
}

// =============================================================================
// Cache
// =============================================================================

#[test]
fn cache_compiles_once_per_locale() {
    let cache = ArtifactCache::default();
    let mut loads = 0;
    let first = cache
        .get_or_compile("fr", || {
            loads += 1;
            Ok::<_, CompileError>(french())
        })
        .unwrap();
    let second = cache
        .get_or_compile("fr", || {
            loads += 1;
            Ok::<_, CompileError>(french())
        })
        .unwrap();
    assert_eq!(loads, 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn cache_keeps_locales_apart() {
    let cache = ArtifactCache::default();
    cache
        .get_or_compile("fr", || Ok::<_, CompileError>(french()))
        .unwrap();
    cache
        .get_or_compile("de", || Ok::<_, CompileError>(Catalog::default()))
        .unwrap();
    assert_eq!(cache.len(), 2);
    assert!(cache.get("fr").unwrap().body.contains("Bonjour"));
    assert!(!cache.get("de").unwrap().body.contains("Bonjour"));
}

#[test]
fn cache_invalidation_forces_recompile() {
    let cache = ArtifactCache::default();
    cache
        .get_or_compile("fr", || Ok::<_, CompileError>(french()))
        .unwrap();
    assert!(cache.invalidate("fr"));
    assert!(!cache.invalidate("fr"));
    assert!(cache.get("fr").is_none());

    let mut updated = french();
    updated.raw.insert(MessageKey::singular("Bye"), "Salut");
    let artifact = cache
        .get_or_compile("fr", || Ok::<_, CompileError>(updated))
        .unwrap();
    assert!(artifact.body.contains("Salut"));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn cache_does_not_store_failures() {
    let cache = ArtifactCache::default();
    let mut broken = french();
    broken.metadata = "Plural-Forms: nplurals=2; plural=n +;".to_string();
    assert!(
        cache
            .get_or_compile("fr", || Ok::<_, CompileError>(broken))
            .is_err()
    );
    assert!(cache.is_empty());
}

#[test]
fn cache_propagates_loader_errors() {
    #[derive(Debug)]
    enum LoadError {
        Missing,
        Compile,
    }
    impl From<CompileError> for LoadError {
        fn from(_: CompileError) -> Self {
            LoadError::Compile
        }
    }

    let cache = ArtifactCache::default();
    let result = cache.get_or_compile("xx", || Err(LoadError::Missing));
    assert!(matches!(result, Err(LoadError::Missing)));
    assert!(cache.is_empty());
}
