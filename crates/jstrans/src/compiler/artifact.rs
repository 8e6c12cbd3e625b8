//! Catalog compilation into a self-contained JavaScript artifact.

use bon::Builder;
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};

use crate::compiler::CompileError;
use crate::interpreter::{MessageResolver, Normalizer, PluralRule};
use crate::parser::parse_plural_forms;
use crate::types::Catalog;

/// MIME type the artifact is served with.
pub const CONTENT_TYPE: &str = "text/javascript";

/// Namespace the runtime is bound to unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "babel";

/// The catalog-independent lookup runtime.
const RUNTIME: &str = include_str!("runtime.js");

/// Names the namespace may not take: reserved words and the exported entry
/// points.
const RESERVED_NAMES: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "format",
    "function", "gettext", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "ngettext", "null", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
    "yield",
];

/// How the runtime module is exposed to the host page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScriptFlavor {
    /// A classic script binding a single `var <namespace>` whose members are
    /// `format`, `gettext` and `ngettext`.
    #[default]
    Namespace,
    /// An ES module exporting `format`, `gettext` and `ngettext` by name and
    /// the namespace object as the default export.
    EsModule,
}

/// Settings for [`CatalogCompiler`].
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct CompilerOptions {
    /// Identifier the runtime module is bound to.
    #[builder(default = DEFAULT_NAMESPACE.to_string())]
    namespace: String,

    /// Script or ES module output.
    #[builder(default)]
    flavor: ScriptFlavor,

    /// Indent the embedded JSON.
    #[builder(default = true)]
    pretty: bool,

    /// Locale the catalog belongs to. Only used to label log events.
    locale: Option<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions::builder().build()
    }
}

impl CompilerOptions {
    /// The namespace identifier.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The output flavor.
    pub fn flavor(&self) -> ScriptFlavor {
        self.flavor
    }

    /// The locale label, if any.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

/// A compiled catalog, ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Always [`CONTENT_TYPE`].
    pub content_type: &'static str,
    /// The script text.
    pub body: String,
}

/// Compiles catalogs into JavaScript artifacts.
///
/// # Example
///
/// ```
/// use jstrans::{Catalog, CatalogCompiler, MessageKey};
///
/// let mut catalog = Catalog::default();
/// catalog.metadata = "Plural-Forms: nplurals=2; plural=(n > 1);".to_string();
/// catalog.raw.insert(MessageKey::singular("Hello"), "Bonjour");
///
/// let artifact = CatalogCompiler::default().compile(&catalog).unwrap();
/// assert_eq!(artifact.content_type, "text/javascript");
/// assert!(artifact.body.contains("\"Hello\": \"Bonjour\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogCompiler {
    options: CompilerOptions,
}

impl CatalogCompiler {
    /// Create a compiler with the given options.
    pub fn new(options: CompilerOptions) -> Self {
        CatalogCompiler { options }
    }

    /// The compiler's options.
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Normalize the catalog and compile its plural rule.
    ///
    /// The returned resolver answers lookups exactly as the compiled artifact
    /// will.
    ///
    /// # Errors
    ///
    /// Fails on an invalid plural expression or a malformed catalog entry.
    pub fn prepare(&self, catalog: &Catalog) -> Result<MessageResolver, CompileError> {
        let forms = parse_plural_forms(&catalog.metadata).unwrap_or_default();
        let plural_rule = forms
            .expression
            .as_deref()
            .map(PluralRule::compile)
            .transpose()?;
        if let Some(rule) = &plural_rule {
            debug!(rule = %rule.expr(), "compiled plural rule");
        }

        let normalized = Normalizer::builder()
            .maybe_nplurals(forms.nplurals)
            .build()
            .normalize(&catalog.raw)?;

        Ok(MessageResolver::new(normalized, plural_rule))
    }

    /// Compile a catalog into an artifact.
    ///
    /// # Errors
    ///
    /// Any failure aborts the whole build; see [`CompileError`].
    pub fn compile(&self, catalog: &Catalog) -> Result<Artifact, CompileError> {
        let resolver = self.prepare(catalog)?;
        let body = self.render(&resolver)?;
        info!(
            locale = self.options.locale(),
            entries = resolver.catalog().len(),
            plurals = resolver.catalog().plural_count(),
            has_plural_rule = resolver.plural_rule().is_some(),
            bytes = body.len(),
            "compiled catalog artifact"
        );
        Ok(Artifact {
            content_type: CONTENT_TYPE,
            body,
        })
    }

    /// Serialize a prepared resolver as script text.
    ///
    /// # Errors
    ///
    /// Fails if the namespace is not a valid identifier or serialization
    /// fails.
    pub fn render(&self, resolver: &MessageResolver) -> Result<String, CompileError> {
        let namespace = self.options.namespace.as_str();
        if !is_identifier(namespace) {
            return Err(CompileError::InvalidNamespace(namespace.to_string()));
        }

        let catalog = self.to_json(resolver.catalog())?;
        let plural_rule = self.to_json(&resolver.plural_rule())?;
        let binding = match self.options.flavor {
            ScriptFlavor::Namespace => "var",
            ScriptFlavor::EsModule => "const",
        };

        let mut script = String::with_capacity(RUNTIME.len() + catalog.len() + plural_rule.len() + 512);
        script.push_str("\"use strict\";\n\n");
        script.push_str(&format!("{binding} {namespace} = (function () {{\n"));
        script.push_str(&format!("    var catalog = {catalog};\n\n"));
        script.push_str(&format!("    var pluralRule = {plural_rule};\n\n"));
        script.push_str(RUNTIME);
        script.push_str(
            "\n    return {\n        format: format,\n        gettext: gettext,\n        ngettext: ngettext\n    };\n})();\n",
        );
        if self.options.flavor == ScriptFlavor::EsModule {
            script.push('\n');
            for entry_point in ["format", "gettext", "ngettext"] {
                script.push_str(&format!(
                    "export const {entry_point} = {namespace}.{entry_point};\n"
                ));
            }
            script.push_str(&format!("export default {namespace};\n"));
        }
        Ok(script)
    }

    /// JSON text safe to embed in a script, indented to sit inside the
    /// initializer function.
    fn to_json<T: Serialize>(&self, value: &T) -> Result<String, CompileError> {
        let json = if self.options.pretty {
            let mut buffer = Vec::new();
            let mut serializer =
                Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
            value.serialize(&mut serializer)?;
            String::from_utf8_lossy(&buffer).replace('\n', "\n    ")
        } else {
            serde_json::to_string(value)?
        };
        Ok(json
            .replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029")
            .replace("</", "<\\/"))
    }
}

/// Whether `name` can be declared with `var`/`const` and does not shadow an
/// entry point.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("babel"));
        assert!(is_identifier("$i18n_2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("my-ns"));
        assert!(!is_identifier("class"));
        assert!(!is_identifier("gettext"));
    }
}
