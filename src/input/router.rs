//! Input routing between the overlay and the engine
//!
//! The overlay gets first refusal on keys and scrolls. Touch and mouse
//! button events are shown to the overlay but always reach the engine.

use crate::input::events::{KeyAction, MotionAction, MotionEvent};
use crate::ui::overlay::OverlayCapability;

/// The engine's own input handling (the host's default dispatch)
pub trait EngineInput {
    fn dispatch_key(&mut self, code: i32, action: KeyAction) -> bool;
    fn dispatch_touch(&mut self, event: &MotionEvent) -> bool;
    fn dispatch_generic_motion(&mut self, event: &MotionEvent) -> bool;
}

/// Routes one event at a time; borrows its endpoints for the duration
pub struct InputRouter<'a> {
    overlay: Option<&'a mut dyn OverlayCapability>,
    engine: &'a mut dyn EngineInput,
}

impl<'a> InputRouter<'a> {
    /// # Arguments
    /// * `overlay` - Running overlay, or `None` when it is stopped
    /// * `engine` - Engine dispatch that unconsumed events fall through to
    pub fn new(
        overlay: Option<&'a mut dyn OverlayCapability>,
        engine: &'a mut dyn EngineInput,
    ) -> Self {
        Self { overlay, engine }
    }

    /// Key events: consumed by the overlay, or forwarded unchanged
    pub fn route_key(&mut self, code: i32, action: KeyAction) -> bool {
        if let Some(overlay) = self.overlay.as_deref_mut() {
            if overlay.handle_key_event(code, action) {
                return true;
            }
        }
        self.engine.dispatch_key(code, action)
    }

    /// Touch events: overlay observes, engine always receives
    ///
    /// # Returns
    /// The engine's own result
    pub fn route_touch(&mut self, event: &MotionEvent) -> bool {
        if let Some(overlay) = self.overlay.as_deref_mut() {
            overlay.handle_touch_event(event);
        }
        self.engine.dispatch_touch(event)
    }

    /// Mouse buttons and scroll wheel
    pub fn route_generic_motion(&mut self, event: &MotionEvent) -> bool {
        match event.action {
            action if action.is_button() => {
                if let Some(overlay) = self.overlay.as_deref_mut() {
                    overlay.handle_mouse_event(event);
                }
            }
            MotionAction::Scroll if event.vscroll != 0.0 => {
                if let Some(overlay) = self.overlay.as_deref_mut() {
                    if overlay.handle_scroll_event(event.vscroll) {
                        return true;
                    }
                }
            }
            _ => {}
        }
        self.engine.dispatch_generic_motion(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ScriptedOverlay {
        consume_keys: bool,
        consume_scroll: bool,
        keys: Vec<(i32, KeyAction)>,
        touches: usize,
        mouse: usize,
        scrolls: Vec<f32>,
    }

    impl OverlayCapability for ScriptedOverlay {
        fn start(&mut self) {}
        fn stop(&mut self) {}
        fn handle_key_event(&mut self, code: i32, action: KeyAction) -> bool {
            self.keys.push((code, action));
            self.consume_keys
        }
        fn handle_touch_event(&mut self, _event: &MotionEvent) {
            self.touches += 1;
        }
        fn handle_mouse_event(&mut self, _event: &MotionEvent) {
            self.mouse += 1;
        }
        fn handle_scroll_event(&mut self, delta: f32) -> bool {
            self.scrolls.push(delta);
            self.consume_scroll
        }
    }

    #[derive(Default)]
    struct RecordingEngine {
        keys: Vec<(i32, KeyAction)>,
        touches: usize,
        motions: Vec<MotionAction>,
    }

    impl EngineInput for RecordingEngine {
        fn dispatch_key(&mut self, code: i32, action: KeyAction) -> bool {
            self.keys.push((code, action));
            true
        }
        fn dispatch_touch(&mut self, _event: &MotionEvent) -> bool {
            self.touches += 1;
            true
        }
        fn dispatch_generic_motion(&mut self, event: &MotionEvent) -> bool {
            self.motions.push(event.action);
            false
        }
    }

    #[test]
    fn consumed_key_never_reaches_engine() {
        let mut overlay = ScriptedOverlay {
            consume_keys: true,
            ..Default::default()
        };
        let mut engine = RecordingEngine::default();

        let consumed = InputRouter::new(Some(&mut overlay), &mut engine).route_key(62, KeyAction::Down);
        assert!(consumed);
        assert!(engine.keys.is_empty());
        assert_eq!(overlay.keys, vec![(62, KeyAction::Down)]);
    }

    #[test]
    fn unconsumed_key_reaches_engine_unchanged() {
        let mut overlay = ScriptedOverlay::default();
        let mut engine = RecordingEngine::default();

        InputRouter::new(Some(&mut overlay), &mut engine).route_key(29, KeyAction::Up);
        assert_eq!(engine.keys, vec![(29, KeyAction::Up)]);
    }

    #[test]
    fn no_overlay_forwards_everything() {
        let mut engine = RecordingEngine::default();
        let mut router = InputRouter::new(None, &mut engine);
        router.route_key(4, KeyAction::Down);
        router.route_touch(&MotionEvent::new(MotionAction::Down, 1.0, 1.0));
        router.route_generic_motion(&MotionEvent::scroll(0.0, 0.0, 1.0));
        assert_eq!(engine.keys.len(), 1);
        assert_eq!(engine.touches, 1);
        assert_eq!(engine.motions, vec![MotionAction::Scroll]);
    }

    #[test]
    fn touch_always_reaches_engine() {
        let mut overlay = ScriptedOverlay {
            consume_keys: true,
            consume_scroll: true,
            ..Default::default()
        };
        let mut engine = RecordingEngine::default();

        let handled = InputRouter::new(Some(&mut overlay), &mut engine)
            .route_touch(&MotionEvent::new(MotionAction::Down, 5.0, 5.0));
        assert!(handled);
        assert_eq!(overlay.touches, 1);
        assert_eq!(engine.touches, 1);
    }

    #[test]
    fn button_events_are_advisory() {
        let mut overlay = ScriptedOverlay::default();
        let mut engine = RecordingEngine::default();
        let mut router = InputRouter::new(Some(&mut overlay), &mut engine);

        router.route_generic_motion(&MotionEvent::new(MotionAction::ButtonPress, 0.0, 0.0));
        router.route_generic_motion(&MotionEvent::new(MotionAction::ButtonRelease, 0.0, 0.0));
        drop(router);

        assert_eq!(overlay.mouse, 2);
        assert_eq!(
            engine.motions,
            vec![MotionAction::ButtonPress, MotionAction::ButtonRelease]
        );
    }

    #[test]
    fn consumed_scroll_stops_at_overlay() {
        let mut overlay = ScriptedOverlay {
            consume_scroll: true,
            ..Default::default()
        };
        let mut engine = RecordingEngine::default();

        let consumed = InputRouter::new(Some(&mut overlay), &mut engine)
            .route_generic_motion(&MotionEvent::scroll(0.0, 0.0, -1.0));
        assert!(consumed);
        assert_eq!(overlay.scrolls, vec![-1.0]);
        assert!(engine.motions.is_empty());
    }

    #[test]
    fn zero_scroll_skips_overlay() {
        let mut overlay = ScriptedOverlay {
            consume_scroll: true,
            ..Default::default()
        };
        let mut engine = RecordingEngine::default();

        InputRouter::new(Some(&mut overlay), &mut engine)
            .route_generic_motion(&MotionEvent::scroll(0.0, 0.0, 0.0));
        assert!(overlay.scrolls.is_empty());
        assert_eq!(engine.motions, vec![MotionAction::Scroll]);
    }

    #[test]
    fn hover_goes_straight_to_engine() {
        let mut overlay = ScriptedOverlay::default();
        let mut engine = RecordingEngine::default();

        InputRouter::new(Some(&mut overlay), &mut engine)
            .route_generic_motion(&MotionEvent::new(MotionAction::HoverMove, 3.0, 4.0));
        assert_eq!(overlay.mouse, 0);
        assert_eq!(engine.motions, vec![MotionAction::HoverMove]);
    }
}
