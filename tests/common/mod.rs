//! Recording fakes for driving a `ShimController` without a real host

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use render_shim::app::{Collaborators, HostEnvironment, LaunchRequest, ShimController};
use render_shim::config::{SettingsStore, ShimSettings};
use render_shim::domain::{LaunchParams, Size, StorageKind};
use render_shim::input::{EngineInput, KeyAction, MotionEvent};
use render_shim::platform::{DefaultStorage, FixedDisplay, LibraryError, LibraryLoader};
use render_shim::ui::OverlayCapability;
use render_shim::view::ViewNode;

pub type Log = Rc<RefCell<Vec<String>>>;

pub const FULL_HD: Size = Size::new(1920, 1080);
pub const HALF: Size = Size::new(960, 540);

pub struct FakeHost {
    pub log: Log,
    pub root: Rc<RefCell<Option<Rc<dyn ViewNode>>>>,
}

impl DefaultStorage for FakeHost {
    fn default_storage_path(&self, kind: &StorageKind) -> PathBuf {
        PathBuf::from("/host/default").join(kind.to_string())
    }
}

impl HostEnvironment for FakeHost {
    fn root_view(&self) -> Option<Rc<dyn ViewNode>> {
        self.root.borrow().clone()
    }

    fn show_message(&mut self, message: &str) {
        self.log.borrow_mut().push(format!("message: {message}"));
    }

    fn relaunch_launcher(&mut self, request: &LaunchRequest) {
        self.log.borrow_mut().push(format!(
            "relaunch new_task={} clear_task={}",
            request.new_task, request.clear_task
        ));
    }

    fn finish(&mut self) {
        self.log.borrow_mut().push("finish".to_string());
    }

    fn finish_and_remove_task(&mut self) {
        self.log.borrow_mut().push("finish_and_remove_task".to_string());
    }

    fn terminate_process(&mut self) {
        self.log.borrow_mut().push("terminate".to_string());
    }
}

pub struct FakeLoader {
    pub log: Log,
}

impl LibraryLoader for FakeLoader {
    fn load_native_library(&mut self, name: &str) -> Result<(), LibraryError> {
        self.log.borrow_mut().push(format!("load {name}"));
        Ok(())
    }
}

/// Overlay that consumes keys below `consume_keys_below` and all scrolls
pub struct FakeOverlay {
    pub log: Log,
    pub consume_keys_below: i32,
}

impl OverlayCapability for FakeOverlay {
    fn start(&mut self) {
        self.log.borrow_mut().push("overlay start".to_string());
    }

    fn stop(&mut self) {
        self.log.borrow_mut().push("overlay stop".to_string());
    }

    fn handle_key_event(&mut self, code: i32, _action: KeyAction) -> bool {
        self.log.borrow_mut().push(format!("overlay key {code}"));
        code < self.consume_keys_below
    }

    fn handle_touch_event(&mut self, _event: &MotionEvent) {
        self.log.borrow_mut().push("overlay touch".to_string());
    }

    fn handle_mouse_event(&mut self, _event: &MotionEvent) {
        self.log.borrow_mut().push("overlay mouse".to_string());
    }

    fn handle_scroll_event(&mut self, _delta: f32) -> bool {
        self.log.borrow_mut().push("overlay scroll".to_string());
        true
    }
}

pub struct FakeEngine {
    pub log: Log,
}

impl EngineInput for FakeEngine {
    fn dispatch_key(&mut self, code: i32, _action: KeyAction) -> bool {
        self.log.borrow_mut().push(format!("engine key {code}"));
        true
    }

    fn dispatch_touch(&mut self, _event: &MotionEvent) -> bool {
        self.log.borrow_mut().push("engine touch".to_string());
        true
    }

    fn dispatch_generic_motion(&mut self, _event: &MotionEvent) -> bool {
        self.log.borrow_mut().push("engine motion".to_string());
        true
    }
}

/// Render scale the launcher may change between passes
pub struct SharedScale(pub Rc<Cell<f32>>);

impl SettingsStore for SharedScale {
    fn render_scale(&self) -> f32 {
        self.0.get()
    }
}

/// A controller plus handles on everything it was built from
pub struct Harness {
    pub shim: ShimController,
    pub log: Log,
    pub root: Rc<RefCell<Option<Rc<dyn ViewNode>>>>,
    pub scale: Rc<Cell<f32>>,
    pub display: Rc<FixedDisplay>,
    pub start: Instant,
}

impl Harness {
    pub fn new(scale: f32, config: ShimSettings) -> Self {
        let log: Log = Rc::default();
        let root: Rc<RefCell<Option<Rc<dyn ViewNode>>>> = Rc::default();
        let shared_scale = Rc::new(Cell::new(scale));
        let display = Rc::new(FixedDisplay::new(FULL_HD));
        let start = Instant::now();

        let parts = Collaborators {
            host: Box::new(FakeHost {
                log: Rc::clone(&log),
                root: Rc::clone(&root),
            }),
            loader: Box::new(FakeLoader {
                log: Rc::clone(&log),
            }),
            overlay: Box::new(FakeOverlay {
                log: Rc::clone(&log),
                consume_keys_below: 100,
            }),
            engine: Box::new(FakeEngine {
                log: Rc::clone(&log),
            }),
            settings: Box::new(SharedScale(Rc::clone(&shared_scale))),
            display: Box::new(Rc::clone(&display)),
        };

        Self {
            shim: ShimController::new(parts, config, start),
            log,
            root,
            scale: shared_scale,
            display,
            start,
        }
    }

    pub fn set_root<N: ViewNode + 'static>(&self, node: Rc<N>) {
        let node: Rc<dyn ViewNode> = node;
        *self.root.borrow_mut() = Some(node);
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

pub fn launch(version: &str) -> LaunchParams {
    LaunchParams {
        version_code: Some(version.to_string()),
        ..Default::default()
    }
}
