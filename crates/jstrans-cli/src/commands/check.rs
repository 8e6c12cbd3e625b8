//! Implementation of the `jstrans check` command.

use std::path::PathBuf;

use clap::Args;
use jstrans::CatalogCompiler;
use jstrans::parser::parse_plural_forms;
use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::source::load_prepared;
use crate::output::table::{CatalogSummary, format_summary_table};

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Catalogs to check (.po or .json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked catalog.
#[derive(Debug, Serialize)]
struct CheckJson {
    path: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    messages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plurals: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
///
/// Every file is checked even after a failure; the exit code reports whether
/// any failed.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let compiler = CatalogCompiler::default();
    let mut summaries = Vec::new();
    let mut results = Vec::new();
    let mut failed = false;

    for path in &args.files {
        let display = path.display().to_string();
        match load_prepared(path, &compiler) {
            Ok((catalog, resolver)) => {
                let forms = parse_plural_forms(&catalog.metadata).unwrap_or_default();
                results.push(CheckJson {
                    path: display.clone(),
                    ok: true,
                    messages: Some(resolver.catalog().len()),
                    plurals: Some(resolver.catalog().plural_count()),
                    error: None,
                });
                summaries.push(CatalogSummary {
                    path: display,
                    messages: resolver.catalog().len(),
                    plurals: resolver.catalog().plural_count(),
                    nplurals: forms.nplurals,
                    rule: resolver.plural_rule().map(|rule| rule.expr().to_string()),
                });
            }
            Err(report) => {
                failed = true;
                if args.json {
                    results.push(CheckJson {
                        path: display,
                        ok: false,
                        messages: None,
                        plurals: None,
                        error: Some(report.to_string()),
                    });
                } else {
                    eprintln!("{report:?}");
                }
            }
        }
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).into_diagnostic()?
        );
    } else {
        if !summaries.is_empty() {
            println!("{}", format_summary_table(&summaries));
        }
        let checked = args.files.len();
        if failed {
            println!("{}", format!("{} of {checked} catalogs failed", checked - summaries.len()).red());
        } else {
            println!("{}", format!("{checked} catalogs OK").green());
        }
    }

    Ok(if failed {
        exitcode::DATAERR
    } else {
        exitcode::OK
    })
}
