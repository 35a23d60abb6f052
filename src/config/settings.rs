//! Shim settings
//!
//! Persisted JSON configuration and the read-only render-scale store the
//! enforcement passes consult.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed settings file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Process-wide shim configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShimSettings {
    /// Fraction of the native resolution the engine renders at. `1.0`
    /// disables enforcement.
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,
    /// Delay between focus gain and the first enforcement pass, giving the
    /// engine time to create its surface.
    #[serde(default = "default_focus_delay_ms")]
    pub focus_delay_ms: u64,
    /// Run the periodic fallback reconciliation while resumed.
    #[serde(default = "default_true")]
    pub periodic_reconcile: bool,
    #[serde(default = "default_reconcile_interval_ms")]
    pub reconcile_interval_ms: u64,
    /// When enabled the binary initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default = "default_engine_namespace")]
    pub engine_namespace: String,
    #[serde(default = "default_package_id")]
    pub package_id: String,
    #[serde(default = "default_engine_library")]
    pub engine_library: String,
    /// Optional library loaded ahead of the engine; failures are ignored.
    #[serde(default = "default_preloader_library")]
    pub preloader_library: Option<String>,
    /// Directories searched for native libraries before the system path.
    #[serde(default)]
    pub library_dirs: Vec<PathBuf>,
}

fn default_render_scale() -> f32 {
    1.0
}

fn default_focus_delay_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_reconcile_interval_ms() -> u64 {
    2000
}

fn default_engine_namespace() -> String {
    "com.mojang".to_string()
}

fn default_package_id() -> String {
    "com.mojang.minecraftpe".to_string()
}

fn default_engine_library() -> String {
    "minecraftpe".to_string()
}

fn default_preloader_library() -> Option<String> {
    Some("preloader".to_string())
}

impl Default for ShimSettings {
    fn default() -> Self {
        Self {
            render_scale: default_render_scale(),
            focus_delay_ms: default_focus_delay_ms(),
            periodic_reconcile: true,
            reconcile_interval_ms: default_reconcile_interval_ms(),
            debug_logging: false,
            engine_namespace: default_engine_namespace(),
            package_id: default_package_id(),
            engine_library: default_engine_library(),
            preloader_library: default_preloader_library(),
            library_dirs: Vec::new(),
        }
    }
}

impl ShimSettings {
    /// Loads settings from a JSON file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Sanitizes a stored render scale. Anything unusable means native.
pub fn sanitize_scale(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value.min(1.0)
    } else {
        1.0
    }
}

/// Read-only access to the render scale
///
/// Queried on every enforcement pass; the value may change between passes
/// but is never written by the shim.
pub trait SettingsStore {
    fn render_scale(&self) -> f32;
}

impl SettingsStore for ShimSettings {
    fn render_scale(&self) -> f32 {
        sanitize_scale(self.render_scale)
    }
}

/// Settings file re-read on every query
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for SettingsFile {
    fn render_scale(&self) -> f32 {
        match ShimSettings::load(&self.path) {
            Ok(settings) => settings.render_scale(),
            Err(e) => {
                warn!("{e}; rendering at native scale");
                1.0
            }
        }
    }
}
