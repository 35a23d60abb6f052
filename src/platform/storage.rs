//! Storage-path redirection for isolated installations
//!
//! Every storage entry point the engine queries goes through
//! [`PathRedirector::resolve`]. With isolation off, or no override root, the
//! host's own default answers; otherwise the path is fixed under the root
//! and its directory is created on demand.

use std::path::PathBuf;

use tracing::warn;

use crate::domain::context::InstallationContext;
use crate::domain::storage::StorageKind;

/// Host fallback for storage locations
pub trait DefaultStorage {
    fn default_storage_path(&self, kind: &StorageKind) -> PathBuf;
}

/// Maps storage kinds to concrete directories for one installation
#[derive(Debug, Clone)]
pub struct PathRedirector {
    context: InstallationContext,
    namespace: String,
}

impl PathRedirector {
    /// # Arguments
    /// * `context` - Installation the paths belong to
    /// * `namespace` - Engine namespace used under `games/`
    pub fn new(context: InstallationContext, namespace: impl Into<String>) -> Self {
        Self {
            context,
            namespace: namespace.into(),
        }
    }

    pub fn context(&self) -> &InstallationContext {
        &self.context
    }

    /// Computes the redirected path without touching the filesystem
    ///
    /// # Returns
    /// `None` when redirection does not apply to this installation
    pub fn redirected(&self, kind: &StorageKind) -> Option<PathBuf> {
        self.context
            .redirect_root()
            .map(|root| kind.layout_under(root, &self.namespace).path)
    }

    /// Resolves `kind` to a concrete path
    ///
    /// Directory creation is best effort: a failure is logged and the path
    /// is still returned, leaving later I/O to surface the problem.
    pub fn resolve<D>(&self, kind: &StorageKind, defaults: &D) -> PathBuf
    where
        D: DefaultStorage + ?Sized,
    {
        let Some(root) = self.context.redirect_root() else {
            return defaults.default_storage_path(kind);
        };

        let layout = kind.layout_under(root, &self.namespace);
        if !layout.directory.is_dir() {
            if let Err(e) = std::fs::create_dir_all(&layout.directory) {
                warn!(
                    "Could not create {} for {}: {}",
                    layout.directory.display(),
                    kind,
                    e
                );
            }
        }
        layout.path
    }
}
