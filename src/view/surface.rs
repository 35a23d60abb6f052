//! Rendering surface capability and weak handles to it
//!
//! The engine owns its surface and may destroy it at any time, so the shim
//! only ever holds a [`SurfaceHandle`] (a weak reference) and re-resolves it
//! on every access.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::domain::core::{Size, VisualTransform};

/// Errors raised while reading or mutating a surface
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("Rendering surface is no longer attached to the view tree")]
    Detached,

    #[error("Surface rejected {operation}: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
}

/// Identifier of a registered size listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback fired when the surface's reported dimensions change
///
/// The host may invoke it from any thread, so it must not touch view state
/// directly.
pub type SizeListener = Box<dyn Fn(Size) + Send + Sync>;

/// The drawable target the engine renders into
pub trait RenderSurface {
    /// Current render-buffer size
    fn buffer_size(&self) -> Size;

    /// Current layout size
    fn layout_size(&self) -> Size;

    /// Current visual transform
    fn transform(&self) -> VisualTransform;

    /// Pins the render buffer to `size`
    fn set_fixed_buffer_size(&self, size: Size) -> Result<(), SurfaceError>;

    /// Sets layout width and height
    fn set_layout_size(&self, size: Size) -> Result<(), SurfaceError>;

    /// Sets pivot and scale factors
    fn set_transform(&self, transform: VisualTransform) -> Result<(), SurfaceError>;

    fn add_size_listener(&self, listener: SizeListener) -> Result<ListenerId, SurfaceError>;

    fn remove_size_listener(&self, id: ListenerId);
}

/// Non-owning reference to a located surface
#[derive(Clone)]
pub struct SurfaceHandle {
    surface: Weak<dyn RenderSurface>,
}

impl SurfaceHandle {
    pub fn new(surface: &Rc<dyn RenderSurface>) -> Self {
        Self {
            surface: Rc::downgrade(surface),
        }
    }

    /// Resolves the handle, failing if the engine dropped the surface
    pub fn upgrade(&self) -> Result<Rc<dyn RenderSurface>, SurfaceError> {
        self.surface.upgrade().ok_or(SurfaceError::Detached)
    }

    pub fn is_alive(&self) -> bool {
        self.surface.strong_count() > 0
    }

    /// True if both handles point at the same surface node
    pub fn same_surface(&self, other: &SurfaceHandle) -> bool {
        Weak::ptr_eq(&self.surface, &other.surface)
    }
}

impl fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
