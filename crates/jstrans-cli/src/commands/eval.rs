//! Implementation of the `jstrans eval` command.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use jstrans::{CatalogCompiler, Value};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use super::source::load_prepared;

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Catalog to resolve against (.po or .json)
    pub catalog: PathBuf,

    /// Source text of the message
    #[arg(long, required = true)]
    pub text: String,

    /// Plural source text; resolves with ngettext
    #[arg(long, requires = "count")]
    pub plural: Option<String>,

    /// Count selecting the plural form
    #[arg(long, requires = "plural")]
    pub count: Option<u64>,

    /// Parameters in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<usize>,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Interpret a parameter the way a JavaScript caller would most likely pass
/// it: integers and floats as numbers, everything else as a string.
fn parse_value(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::from(f),
        _ => Value::from(raw),
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let (_, resolver) = load_prepared(&args.catalog, &CatalogCompiler::default())?;

    let params: HashMap<String, Value> = args
        .params
        .into_iter()
        .map(|(k, v)| (k, parse_value(v)))
        .collect();

    let (result, form) = match (&args.plural, args.count) {
        (Some(plural), Some(count)) => (
            resolver.ngettext(&args.text, plural, count, &params),
            Some(resolver.plural_index(count)),
        ),
        _ => (resolver.gettext(&args.text, &params), None),
    };

    match result {
        Ok(result) => {
            if args.json {
                let output = EvalResult { result, form };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Evaluation error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}
