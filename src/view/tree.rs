//! View tree abstraction and the rendering-surface search
//!
//! The search is never memoized: the engine can tear down and recreate its
//! surface node independently of the shim, so each lookup walks the tree
//! again.

use std::rc::Rc;

use crate::view::surface::{RenderSurface, SurfaceHandle};

/// A node in the host's view hierarchy
pub trait ViewNode {
    /// Direct children in draw order
    fn children(&self) -> Vec<Rc<dyn ViewNode>>;

    /// Returns the node as a rendering surface if it is one
    fn as_surface(self: Rc<Self>) -> Option<Rc<dyn RenderSurface>>;
}

/// Stateless depth-first search for the engine's rendering surface
pub struct SurfaceLocator;

impl SurfaceLocator {
    /// Finds the first rendering surface in pre-order below (and including)
    /// `root`
    ///
    /// # Returns
    /// A weak handle to the surface, or `None` if the engine has not created
    /// one yet. `None` is an expected outcome, not an error.
    pub fn find(root: &Rc<dyn ViewNode>) -> Option<SurfaceHandle> {
        if let Some(surface) = Rc::clone(root).as_surface() {
            return Some(SurfaceHandle::new(&surface));
        }
        root.children().iter().find_map(Self::find)
    }
}
