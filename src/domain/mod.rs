//! Domain logic and core data structures
//!
//! This module contains pure logic that is independent of the host
//! environment: target math, launch context and storage layout.

pub mod context;
pub mod core;
pub mod storage;

pub use context::{InstallationContext, LaunchError, LaunchParams};
pub use self::core::{Size, SurfaceTarget, TargetError, VisualTransform};
pub use storage::{StorageKind, StorageLayout};
