//! In-memory view tree
//!
//! A minimal host-independent implementation of [`ViewNode`] and
//! [`RenderSurface`]. It behaves like a native surface view: pinning the
//! buffer size notifies size listeners, and the engine side can resize the
//! surface behind the shim's back with [`SurfaceView::engine_resize`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use crate::domain::core::{Size, VisualTransform};
use crate::view::surface::{ListenerId, RenderSurface, SizeListener, SurfaceError};
use crate::view::tree::ViewNode;

/// Container node
#[derive(Default)]
pub struct ViewGroup {
    children: RefCell<Vec<Rc<dyn ViewNode>>>,
}

impl ViewGroup {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Appends a child and returns the group, for building trees inline
    pub fn with<N: ViewNode + 'static>(self: Rc<Self>, child: Rc<N>) -> Rc<Self> {
        self.add(child);
        self
    }

    pub fn add<N: ViewNode + 'static>(&self, child: Rc<N>) {
        self.children.borrow_mut().push(child);
    }

    pub fn clear_children(&self) {
        self.children.borrow_mut().clear();
    }
}

impl ViewNode for ViewGroup {
    fn children(&self) -> Vec<Rc<dyn ViewNode>> {
        self.children.borrow().clone()
    }

    fn as_surface(self: Rc<Self>) -> Option<Rc<dyn RenderSurface>> {
        None
    }
}

type SharedListener = Arc<dyn Fn(Size) + Send + Sync>;

/// Leaf node the engine renders into
pub struct SurfaceView {
    buffer: Cell<Size>,
    layout: Cell<Size>,
    transform: Cell<VisualTransform>,
    attached: Cell<bool>,
    listeners: RefCell<Vec<(ListenerId, SharedListener)>>,
    next_listener: Cell<u64>,
    transform_writes: Cell<usize>,
    buffer_writes: Cell<usize>,
}

impl SurfaceView {
    /// Creates an attached surface whose buffer and layout both match `size`
    pub fn new(size: Size) -> Rc<Self> {
        Rc::new(Self {
            buffer: Cell::new(size),
            layout: Cell::new(size),
            transform: Cell::new(VisualTransform::IDENTITY),
            attached: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
            transform_writes: Cell::new(0),
            buffer_writes: Cell::new(0),
        })
    }

    /// Engine-side resize: buffer and layout change, listeners fire
    pub fn engine_resize(&self, size: Size) {
        self.buffer.set(size);
        self.layout.set(size);
        self.notify(size);
    }

    /// Simulates the view being torn down; further mutation fails
    pub fn detach(&self) {
        self.attached.set(false);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of `set_transform` calls that reached this surface
    pub fn transform_writes(&self) -> usize {
        self.transform_writes.get()
    }

    pub fn buffer_writes(&self) -> usize {
        self.buffer_writes.get()
    }

    fn ensure_attached(&self) -> Result<(), SurfaceError> {
        if self.attached.get() {
            Ok(())
        } else {
            Err(SurfaceError::Detached)
        }
    }

    fn notify(&self, size: Size) {
        // Listeners run outside the borrow so they may (de)register.
        let listeners: Vec<SharedListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(size);
        }
    }
}

impl RenderSurface for SurfaceView {
    fn buffer_size(&self) -> Size {
        self.buffer.get()
    }

    fn layout_size(&self) -> Size {
        self.layout.get()
    }

    fn transform(&self) -> VisualTransform {
        self.transform.get()
    }

    fn set_fixed_buffer_size(&self, size: Size) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        self.buffer_writes.set(self.buffer_writes.get() + 1);
        if self.buffer.replace(size) != size {
            self.notify(size);
        }
        Ok(())
    }

    fn set_layout_size(&self, size: Size) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        self.layout.set(size);
        Ok(())
    }

    fn set_transform(&self, transform: VisualTransform) -> Result<(), SurfaceError> {
        self.ensure_attached()?;
        self.transform_writes.set(self.transform_writes.get() + 1);
        self.transform.set(transform);
        Ok(())
    }

    fn add_size_listener(&self, listener: SizeListener) -> Result<ListenerId, SurfaceError> {
        self.ensure_attached()?;
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Arc::from(listener)));
        Ok(id)
    }

    fn remove_size_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }
}

impl ViewNode for SurfaceView {
    fn children(&self) -> Vec<Rc<dyn ViewNode>> {
        Vec::new()
    }

    fn as_surface(self: Rc<Self>) -> Option<Rc<dyn RenderSurface>> {
        Some(self)
    }
}
