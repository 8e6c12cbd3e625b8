//! Artifact generation: the boundary between the catalog source and the
//! transport that serves the compiled script.

mod artifact;
mod cache;
mod error;

pub use artifact::{
    Artifact, CONTENT_TYPE, CatalogCompiler, CompilerOptions, DEFAULT_NAMESPACE, ScriptFlavor,
};
pub use cache::ArtifactCache;
pub use error::CompileError;
