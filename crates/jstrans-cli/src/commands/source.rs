//! Catalog loading shared by the commands.

use std::fs::read_to_string;
use std::path::Path;

use jstrans::parser::parse_plural_forms;
use jstrans::{Catalog, CatalogCompiler, CatalogFile, CompileError, MessageResolver, parse_po};
use miette::{Report, Result, miette};
use tracing::debug;

use crate::output::{CatalogDiagnostic, ExpressionDiagnostic};

/// Read a catalog, choosing the format by extension: `.json` files hold a
/// [`CatalogFile`], anything else is read as PO.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read catalog {}: {}", path.display(), e))?;

    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), json = is_json, "loading catalog");

    if is_json {
        serde_json::from_str::<CatalogFile>(&content)
            .map(Catalog::from)
            .map_err(|e| CatalogDiagnostic::from_json_error(path, &content, &e).into())
    } else {
        parse_po(&content).map_err(|e| CatalogDiagnostic::from_po_error(path, &content, &e).into())
    }
}

/// Turn a compile error into a report, annotating plural-rule errors with the
/// expression from the catalog header.
pub fn compile_report(path: &Path, catalog: &Catalog, err: CompileError) -> Report {
    let expression = parse_plural_forms(&catalog.metadata).and_then(|forms| forms.expression);
    match (&err, expression) {
        (CompileError::Plural(plural), Some(expression)) => ExpressionDiagnostic::from_plural_error(
            &format!("{} (Plural-Forms)", path.display()),
            &expression,
            plural,
        )
        .into(),
        _ => miette!("{}: {}", path.display(), err),
    }
}

/// Load and prepare a catalog with `compiler`, reporting errors.
pub fn load_prepared(
    path: &Path,
    compiler: &CatalogCompiler,
) -> Result<(Catalog, MessageResolver)> {
    let catalog = load_catalog(path)?;
    let resolver = compiler
        .prepare(&catalog)
        .map_err(|e| compile_report(path, &catalog, e))?;
    Ok((catalog, resolver))
}
