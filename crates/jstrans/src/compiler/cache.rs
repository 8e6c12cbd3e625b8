//! Per-locale artifact cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::compiler::{Artifact, CatalogCompiler, CompileError};
use crate::types::Catalog;

/// Caches compiled artifacts by locale.
///
/// A catalog rarely changes between requests for the same locale, so the
/// first request compiles and later ones reuse the result until the locale is
/// invalidated. Safe to share between threads.
///
/// # Example
///
/// ```
/// use jstrans::{ArtifactCache, Catalog, CompileError};
///
/// let cache = ArtifactCache::default();
/// let first = cache
///     .get_or_compile("fr", || Ok::<_, CompileError>(Catalog::default()))
///     .unwrap();
/// let second = cache
///     .get_or_compile("fr", || -> Result<Catalog, CompileError> {
///         unreachable!("already cached")
///     })
///     .unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug, Default)]
pub struct ArtifactCache {
    compiler: CatalogCompiler,
    artifacts: RwLock<HashMap<String, Arc<Artifact>>>,
}

impl ArtifactCache {
    /// Create an empty cache compiling with `compiler`.
    pub fn new(compiler: CatalogCompiler) -> Self {
        ArtifactCache {
            compiler,
            artifacts: RwLock::default(),
        }
    }

    /// Return the cached artifact for `locale`, compiling the catalog from
    /// `load` on a miss.
    ///
    /// # Errors
    ///
    /// Propagates errors from `load` and from compilation. Nothing is cached
    /// on failure.
    pub fn get_or_compile<E>(
        &self,
        locale: &str,
        load: impl FnOnce() -> Result<Catalog, E>,
    ) -> Result<Arc<Artifact>, E>
    where
        E: From<CompileError>,
    {
        if let Some(artifact) = self.get(locale) {
            return Ok(artifact);
        }

        debug!(locale, "artifact cache miss");
        let catalog = load()?;
        let artifact = Arc::new(self.compiler.compile(&catalog)?);

        let mut artifacts = self
            .artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            artifacts.entry(locale.to_string()).or_insert(artifact),
        ))
    }

    /// The cached artifact for `locale`, if any.
    pub fn get(&self, locale: &str) -> Option<Arc<Artifact>> {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
            .cloned()
    }

    /// Drop the artifact for `locale`. Returns whether one was cached.
    pub fn invalidate(&self, locale: &str) -> bool {
        self.artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(locale)
            .is_some()
    }

    /// Drop every cached artifact.
    pub fn clear(&self) {
        self.artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached locales.
    pub fn len(&self) -> usize {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
