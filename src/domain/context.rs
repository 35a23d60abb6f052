//! Launch parameters and the installation context derived from them
//!
//! The context is built once when the shim is created and never mutated
//! afterwards. Every storage-path query is answered against it.

use std::path::{Path, PathBuf};

/// Errors that make the launch parameters unusable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    #[error("No version identifier supplied and no isolated install path to fall back on")]
    MissingVersion,
}

/// Raw launch parameters handed over by the outer launcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    /// Directory of the installed version (override root when isolated)
    pub install_path: Option<String>,
    /// Version identifier, e.g. `1.21.0.3`
    pub version_code: Option<String>,
    /// Name of the version directory inside the launcher's store
    pub version_dir_name: Option<String>,
    /// Whether the version is fully installed
    pub installed: bool,
    /// Whether per-version storage isolation is enabled
    pub isolation: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Immutable description of the installation this shim runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationContext {
    isolation_enabled: bool,
    override_root: PathBuf,
    package_id: String,
    version_label: String,
    version_dir: String,
    installed: bool,
}

impl InstallationContext {
    /// Builds the context from launch parameters
    ///
    /// An isolated launch with an install path is accepted even without a
    /// version code. Otherwise a version code is mandatory.
    ///
    /// # Arguments
    /// * `params` - Parameters supplied by the outer launcher
    /// * `package_id` - Package identifier of the embedded engine
    pub fn from_launch(params: &LaunchParams, package_id: &str) -> Result<Self, LaunchError> {
        let install_path = non_empty(&params.install_path);
        let version_code = non_empty(&params.version_code).unwrap_or_default();
        let version_dir = params.version_dir_name.clone().unwrap_or_default();

        let installed = match (params.isolation, install_path) {
            (true, Some(_)) => params.installed,
            _ if !version_code.is_empty() => true,
            _ => return Err(LaunchError::MissingVersion),
        };

        Ok(Self {
            isolation_enabled: params.isolation,
            override_root: install_path.map(PathBuf::from).unwrap_or_default(),
            package_id: package_id.to_string(),
            version_label: version_code.to_string(),
            version_dir,
            installed,
        })
    }

    pub fn isolation_enabled(&self) -> bool {
        self.isolation_enabled
    }

    /// Root that isolated storage lives under; empty when none was supplied
    pub fn override_root(&self) -> &Path {
        &self.override_root
    }

    /// Returns the root only when redirection actually applies
    pub fn redirect_root(&self) -> Option<&Path> {
        if self.isolation_enabled && !self.override_root.as_os_str().is_empty() {
            Some(&self.override_root)
        } else {
            None
        }
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn version_label(&self) -> &str {
        &self.version_label
    }

    pub fn version_dir(&self) -> &str {
        &self.version_dir
    }

    pub fn installed(&self) -> bool {
        self.installed
    }
}
