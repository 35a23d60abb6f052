//! Compatibility shim between a host window lifecycle and an embedded
//! rendering engine.
//!
//! The shim redirects the engine's storage into an isolated installation
//! root, keeps the engine's render surface pinned to a reduced resolution
//! and gives an optional overlay first look at input.

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod logging;
pub mod platform;
pub mod ui;
pub mod view;

pub use app::{Collaborators, HostEnvironment, ShimController, ShimError, ShimHooks};
pub use config::ShimSettings;
pub use domain::{InstallationContext, LaunchParams, Size, StorageKind, SurfaceTarget};
