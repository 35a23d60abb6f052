//! Host view hierarchy seen from the shim
//!
//! Only the pieces the shim needs: a tree it can walk and a surface it can
//! resize, plus an in-memory implementation of both.

pub mod headless;
pub mod surface;
pub mod tree;

pub use surface::{ListenerId, RenderSurface, SizeListener, SurfaceError, SurfaceHandle};
pub use tree::{SurfaceLocator, ViewNode};
