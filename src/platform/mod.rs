//! Platform-facing collaborators
//!
//! This module encapsulates everything that touches the operating system:
//! display metrics, the dynamic linker and the filesystem.

pub mod display;
pub mod library;
pub mod storage;

pub use display::{DisplayError, DisplayMetrics, FixedDisplay};
pub use library::{DynamicLibraryLoader, LibraryError, LibraryLoader};
pub use storage::{DefaultStorage, PathRedirector};

#[cfg(windows)]
pub use display::SystemDisplay;
