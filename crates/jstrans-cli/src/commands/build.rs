//! Implementation of the `jstrans build` command.

use std::fs::write;
use std::io::{Write, stdout};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use jstrans::{CatalogCompiler, CompilerOptions, DEFAULT_NAMESPACE, ScriptFlavor};
use miette::{IntoDiagnostic, Result, miette};
use tracing::info;

use super::source::{compile_report, load_catalog};

/// Arguments for the build command.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Catalog to compile (.po or .json)
    pub catalog: PathBuf,

    /// Write the artifact here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Identifier the runtime is bound to
    #[arg(long, env = "JSTRANS_NAMESPACE", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Script flavor
    #[arg(long, value_enum, env = "JSTRANS_FLAVOR", default_value_t = Flavor::Script)]
    pub flavor: Flavor,

    /// Embed the catalog without indentation
    #[arg(long)]
    pub compact: bool,

    /// Locale label for log output
    #[arg(long)]
    pub locale: Option<String>,
}

/// Output flavor as named on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Flavor {
    /// Classic script defining a global namespace variable
    Script,
    /// ES module with named exports
    Module,
}

impl From<Flavor> for ScriptFlavor {
    fn from(flavor: Flavor) -> Self {
        match flavor {
            Flavor::Script => ScriptFlavor::Namespace,
            Flavor::Module => ScriptFlavor::EsModule,
        }
    }
}

/// Run the build command.
pub fn run_build(args: BuildArgs) -> Result<i32> {
    let catalog = load_catalog(&args.catalog)?;

    let compiler = CatalogCompiler::new(
        CompilerOptions::builder()
            .namespace(args.namespace)
            .flavor(args.flavor.into())
            .pretty(!args.compact)
            .maybe_locale(args.locale)
            .build(),
    );
    let artifact = compiler
        .compile(&catalog)
        .map_err(|e| compile_report(&args.catalog, &catalog, e))?;

    match &args.output {
        Some(path) => {
            write(path, &artifact.body)
                .map_err(|e| miette!("Cannot write {}: {}", path.display(), e))?;
            info!(path = %path.display(), bytes = artifact.body.len(), "wrote artifact");
        }
        None => {
            stdout()
                .lock()
                .write_all(artifact.body.as_bytes())
                .into_diagnostic()?;
        }
    }

    Ok(exitcode::OK)
}
