//! Implementation of the `jstrans plural` command.

use clap::Args;
use jstrans::PluralRule;
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;

use crate::output::ExpressionDiagnostic;
use crate::output::table::format_plural_table;

/// Arguments for the plural command.
#[derive(Debug, Args)]
pub struct PluralArgs {
    /// Plural-forms expression, e.g. "n%10==1 && n%100!=11 ? 0 : 1"
    pub expression: String,

    /// First count to evaluate
    #[arg(long, default_value_t = 0)]
    pub from: u64,

    /// Last count to evaluate (inclusive)
    #[arg(long, default_value_t = 30)]
    pub to: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a compiled expression.
#[derive(Debug, Serialize)]
struct PluralJson<'a> {
    expression: String,
    rule: &'a PluralRule,
    forms: Vec<FormJson>,
}

#[derive(Debug, Serialize)]
struct FormJson {
    n: u64,
    form: usize,
}

/// Run the plural command.
pub fn run_plural(args: PluralArgs) -> Result<i32> {
    if args.from > args.to {
        return Err(miette!(
            "--from ({}) must not exceed --to ({})",
            args.from,
            args.to
        ));
    }

    let rule = PluralRule::compile(&args.expression).map_err(|e| {
        ExpressionDiagnostic::from_plural_error("expression", &args.expression, &e)
    })?;
    let rows: Vec<(u64, usize)> = (args.from..=args.to).map(|n| (n, rule.index(n))).collect();

    if args.json {
        let output = PluralJson {
            expression: rule.expr().to_string(),
            rule: &rule,
            forms: rows.iter().map(|&(n, form)| FormJson { n, form }).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", rule.expr());
        println!("{}", format_plural_table(&rows));
    }

    Ok(exitcode::OK)
}
