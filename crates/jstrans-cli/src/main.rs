//! jstrans CLI entry point.
//!
//! Provides command-line tools for gettext catalogs:
//! - `jstrans build` - Compile a catalog into a JavaScript runtime
//! - `jstrans check` - Validate catalogs and summarize their contents
//! - `jstrans plural` - Compile a plural-forms expression and tabulate it
//! - `jstrans eval` - Resolve a message the way the runtime would

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    BuildArgs, CheckArgs, EvalArgs, PluralArgs, run_build, run_check, run_eval, run_plural,
};
use tracing_subscriber::EnvFilter;

/// Gettext catalog compiler.
#[derive(Debug, Parser)]
#[command(name = "jstrans")]
#[command(about = "Compile gettext catalogs into JavaScript", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile a catalog into a JavaScript artifact
    Build(BuildArgs),
    /// Check catalogs for errors
    Check(CheckArgs),
    /// Evaluate a plural-forms expression
    Plural(PluralArgs),
    /// Resolve a message against a catalog
    Eval(EvalArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "jstrans=debug" } else { "jstrans=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Check(args) => run_check(args),
        Commands::Plural(args) => run_plural(args),
        Commands::Eval(args) => run_eval(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
