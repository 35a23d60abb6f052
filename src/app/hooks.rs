//! Capability interfaces between the shim and its host window
//!
//! The host provides a fixed base type that the shim cannot change. Instead
//! of inheriting from it, the shim implements [`ShimHooks`] (exactly the
//! hooks it overrides) and consumes [`HostEnvironment`] (exactly what it
//! needs from the host). Everything else stays with the host.

use std::path::PathBuf;
use std::rc::Rc;

use crate::app::controller::ShimError;
use crate::domain::context::LaunchParams;
use crate::input::events::{KeyAction, MotionEvent};
use crate::platform::storage::DefaultStorage;
use crate::view::tree::ViewNode;

/// Request to bring the outer launcher back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Start the launcher in a fresh task
    pub new_task: bool,
    /// Clear any existing task stack first
    pub clear_task: bool,
}

impl LaunchRequest {
    /// Launcher in a new, empty task
    pub fn clean_task() -> Self {
        Self {
            new_task: true,
            clear_task: true,
        }
    }
}

/// What the shim needs from the host window
pub trait HostEnvironment: DefaultStorage {
    /// Root of the current view tree, if the window has one
    fn root_view(&self) -> Option<Rc<dyn ViewNode>>;

    /// User-visible, short-lived message
    fn show_message(&mut self, message: &str);

    fn relaunch_launcher(&mut self, request: &LaunchRequest);

    /// Closes this window, returning to whatever launched it
    fn finish(&mut self);

    /// Closes this window and removes it from recents
    fn finish_and_remove_task(&mut self);

    /// Ends the hosting process
    fn terminate_process(&mut self);
}

/// Hooks the shim overrides on the host's base type
pub trait ShimHooks {
    fn on_create(&mut self, params: &LaunchParams) -> Result<(), ShimError>;
    fn on_resume(&mut self);
    fn on_pause(&mut self);
    fn on_destroy(&mut self);
    fn on_window_focus_changed(&mut self, has_focus: bool);

    fn dispatch_key_event(&mut self, code: i32, action: KeyAction) -> bool;
    fn dispatch_touch_event(&mut self, event: &MotionEvent) -> bool;
    fn dispatch_generic_motion_event(&mut self, event: &MotionEvent) -> bool;

    fn files_dir(&self) -> PathBuf;
    fn data_dir(&self) -> PathBuf;
    fn external_files_dir(&self, subtype: Option<&str>) -> PathBuf;
    fn database_path(&self, name: &str) -> PathBuf;
    fn cache_dir(&self) -> PathBuf;
}
