//! Configuration module for render-shim
//!
//! Settings are owned by the outer launcher; the shim only reads them.

pub mod settings;

pub use settings::{SettingsError, SettingsFile, SettingsStore, ShimSettings, sanitize_scale};
