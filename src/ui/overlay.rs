//! Overlay capability contract
//!
//! The overlay subsystem (mod menus, HUD widgets) is external. The shim only
//! starts and stops it and gives it first look at input.

use tracing::info;

use crate::input::events::{KeyAction, MotionEvent};

/// External overlay subsystem
pub trait OverlayCapability {
    fn start(&mut self);

    fn stop(&mut self);

    /// Returns true if the overlay consumed the key
    fn handle_key_event(&mut self, code: i32, action: KeyAction) -> bool;

    /// Advisory only; the engine still receives the event
    fn handle_touch_event(&mut self, event: &MotionEvent);

    /// Advisory only; the engine still receives the event
    fn handle_mouse_event(&mut self, event: &MotionEvent);

    /// Returns true if the overlay consumed the scroll
    fn handle_scroll_event(&mut self, delta: f32) -> bool;
}

/// RAII wrapper tracking whether the overlay is running
///
/// A stopped overlay never sees input. Dropping a running slot stops it.
pub struct OverlaySlot {
    overlay: Box<dyn OverlayCapability>,
    running: bool,
}

impl OverlaySlot {
    pub fn new(overlay: Box<dyn OverlayCapability>) -> Self {
        Self {
            overlay,
            running: false,
        }
    }

    /// Starts the overlay unless it is already running
    ///
    /// # Returns
    /// true if this call started it
    pub fn ensure_started(&mut self) -> bool {
        if self.running {
            return false;
        }
        info!("Starting overlay");
        self.overlay.start();
        self.running = true;
        true
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("Stopping overlay");
            self.overlay.stop();
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The overlay, only while it is running
    pub fn active(&mut self) -> Option<&mut dyn OverlayCapability> {
        if self.running {
            Some(self.overlay.as_mut())
        } else {
            None
        }
    }
}

impl Drop for OverlaySlot {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counts {
        starts: usize,
        stops: usize,
    }

    struct CountingOverlay(Rc<RefCell<Counts>>);

    impl OverlayCapability for CountingOverlay {
        fn start(&mut self) {
            self.0.borrow_mut().starts += 1;
        }
        fn stop(&mut self) {
            self.0.borrow_mut().stops += 1;
        }
        fn handle_key_event(&mut self, _code: i32, _action: KeyAction) -> bool {
            false
        }
        fn handle_touch_event(&mut self, _event: &MotionEvent) {}
        fn handle_mouse_event(&mut self, _event: &MotionEvent) {}
        fn handle_scroll_event(&mut self, _delta: f32) -> bool {
            false
        }
    }

    #[test]
    fn start_is_idempotent() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut slot = OverlaySlot::new(Box::new(CountingOverlay(Rc::clone(&counts))));
        assert!(slot.active().is_none());

        assert!(slot.ensure_started());
        assert!(!slot.ensure_started());
        assert_eq!(counts.borrow().starts, 1);
        assert!(slot.active().is_some());
    }

    #[test]
    fn drop_stops_running_overlay() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        {
            let mut slot = OverlaySlot::new(Box::new(CountingOverlay(Rc::clone(&counts))));
            slot.ensure_started();
        }
        assert_eq!(counts.borrow().stops, 1);
    }

    #[test]
    fn stop_without_start_is_noop() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut slot = OverlaySlot::new(Box::new(CountingOverlay(Rc::clone(&counts))));
        slot.stop();
        drop(slot);
        assert_eq!(counts.borrow().stops, 0);
    }
}
