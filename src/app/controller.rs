//! Shim controller and lifecycle coordination
//!
//! The controller sequences path redirection, resolution enforcement and
//! the overlay against the host's lifecycle transitions. It owns the
//! installation context and is the only place where a failure may end the
//! shim.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::app::enforcer::{PassOutcome, ResizeSink, ResolutionEnforcer};
use crate::app::hooks::{HostEnvironment, LaunchRequest, ShimHooks};
use crate::app::main_loop::{MainLoop, TaskId};
use crate::app::state::{EnforcementState, LifecycleEvent, PhaseMachine, ShimPhase};
use crate::config::settings::{SettingsStore, ShimSettings};
use crate::domain::context::{InstallationContext, LaunchError, LaunchParams};
use crate::domain::core::Size;
use crate::domain::storage::StorageKind;
use crate::input::events::{KeyAction, MotionEvent};
use crate::input::router::{EngineInput, InputRouter};
use crate::platform::display::DisplayMetrics;
use crate::platform::library::{LibraryError, LibraryLoader};
use crate::platform::storage::PathRedirector;
use crate::ui::overlay::{OverlayCapability, OverlaySlot};

/// Failures that end the shim
#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    #[error("Invalid launch parameters: {0}")]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Library(#[from] LibraryError),
}

/// Work items executed on the UI-owning thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShimTask {
    /// Deferred pass after the window gained focus
    FocusPass,
    /// Self-rescheduling fallback pass while resumed
    PeriodicPass,
    /// Size reported by the surface listener
    SurfaceResized(Size),
}

/// External collaborators the controller drives
pub struct Collaborators {
    pub host: Box<dyn HostEnvironment>,
    pub loader: Box<dyn LibraryLoader>,
    pub overlay: Box<dyn OverlayCapability>,
    pub engine: Box<dyn EngineInput>,
    pub settings: Box<dyn SettingsStore>,
    pub display: Box<dyn DisplayMetrics>,
}

/// Main shim controller
///
/// Implements [`ShimHooks`]; the host forwards its lifecycle, input and
/// storage queries here and turns the loop with [`ShimController::tick`].
pub struct ShimController {
    phase: ShimPhase,
    config: ShimSettings,
    host: Box<dyn HostEnvironment>,
    loader: Box<dyn LibraryLoader>,
    engine: Box<dyn EngineInput>,
    settings: Box<dyn SettingsStore>,
    display: Box<dyn DisplayMetrics>,
    overlay: OverlaySlot,
    redirector: Option<PathRedirector>,
    enforcer: ResolutionEnforcer,
    main_loop: MainLoop<ShimTask>,
    /// Pending periodic pass; `Some` while the watcher is running
    periodic: Option<TaskId>,
    focus_pass: Option<TaskId>,
}

impl ShimController {
    /// Creates a controller in the `Launching` phase
    ///
    /// # Arguments
    /// * `parts` - Host-side collaborators
    /// * `config` - Timing and library configuration
    /// * `now` - Current time of the UI loop
    pub fn new(parts: Collaborators, config: ShimSettings, now: Instant) -> Self {
        let main_loop = MainLoop::new(now);
        let sender = main_loop.sender();
        let sink: ResizeSink = Arc::new(move |size| {
            sender.post(ShimTask::SurfaceResized(size));
        });

        Self {
            phase: ShimPhase::Launching,
            config,
            host: parts.host,
            loader: parts.loader,
            engine: parts.engine,
            settings: parts.settings,
            display: parts.display,
            overlay: OverlaySlot::new(parts.overlay),
            redirector: None,
            enforcer: ResolutionEnforcer::new(sink),
            main_loop,
            periodic: None,
            focus_pass: None,
        }
    }

    pub fn phase(&self) -> ShimPhase {
        self.phase
    }

    pub fn enforcement_state(&self) -> EnforcementState {
        self.enforcer.state()
    }

    pub fn context(&self) -> Option<&InstallationContext> {
        self.redirector.as_ref().map(PathRedirector::context)
    }

    pub fn overlay_running(&self) -> bool {
        self.overlay.is_running()
    }

    pub fn periodic_active(&self) -> bool {
        self.periodic.is_some()
    }

    pub fn focus_pass_pending(&self) -> bool {
        self.focus_pass.is_some()
    }

    pub fn pending_tasks(&self) -> usize {
        self.main_loop.pending()
    }

    /// Executes one turn of the UI loop
    ///
    /// # Returns
    /// Outcome of every pass that ran in this turn, in execution order
    pub fn tick(&mut self, now: Instant) -> Vec<PassOutcome> {
        self.main_loop
            .run_due(now)
            .into_iter()
            .map(|task| self.run_task(task))
            .collect()
    }

    fn run_task(&mut self, task: ShimTask) -> PassOutcome {
        match task {
            ShimTask::FocusPass => {
                self.focus_pass = None;
                self.enforcement_pass()
            }
            ShimTask::PeriodicPass => {
                self.periodic = None;
                let outcome = self.enforcement_pass();
                if self.phase.is_foreground() && self.config.periodic_reconcile {
                    let interval = Duration::from_millis(self.config.reconcile_interval_ms);
                    self.periodic = Some(self.main_loop.post_delayed(ShimTask::PeriodicPass, interval));
                }
                outcome
            }
            ShimTask::SurfaceResized(size) => self.enforcer.reconcile(size),
        }
    }

    fn enforcement_pass(&mut self) -> PassOutcome {
        if self.phase.is_terminal() {
            return PassOutcome::NotScaled;
        }
        let scale = self.settings.render_scale();
        let root = self.host.root_view();
        self.enforcer
            .apply_scale(root.as_ref(), scale, self.display.as_ref())
    }

    fn transition(&mut self, event: LifecycleEvent) -> bool {
        if !PhaseMachine::accepts(self.phase, event) {
            debug!("Ignoring {:?} in phase {:?}", event, self.phase);
            return false;
        }
        self.phase = PhaseMachine::process_event(self.phase, event);
        info!("Shim phase -> {:?}", self.phase);
        true
    }

    fn prepare(&mut self, params: &LaunchParams) -> Result<PathRedirector, ShimError> {
        let context = InstallationContext::from_launch(params, &self.config.package_id)?;
        info!(
            "Launching version {:?} (isolated: {}, root: {})",
            context.version_label(),
            context.isolation_enabled(),
            context.override_root().display()
        );

        if let Some(preloader) = &self.config.preloader_library {
            if let Err(e) = self.loader.load_native_library(preloader) {
                warn!("Failed to load preloader: {e}");
            }
        }
        self.loader.load_native_library(&self.config.engine_library)?;

        Ok(PathRedirector::new(context, self.config.engine_namespace.as_str()))
    }

    fn cancel_focus_pass(&mut self) {
        if let Some(id) = self.focus_pass.take() {
            self.main_loop.cancel(id);
        }
    }

    fn stop_periodic(&mut self) {
        if let Some(id) = self.periodic.take() {
            self.main_loop.cancel(id);
        }
    }

    fn storage_path(&self, kind: StorageKind) -> PathBuf {
        match &self.redirector {
            Some(redirector) => redirector.resolve(&kind, self.host.as_ref()),
            None => self.host.default_storage_path(&kind),
        }
    }

    fn router(&mut self) -> InputRouter<'_> {
        InputRouter::new(self.overlay.active(), self.engine.as_mut())
    }
}

impl ShimHooks for ShimController {
    /// Builds the installation context and loads the engine
    ///
    /// On failure the user is told why and the window finishes, handing
    /// control back to the launcher.
    fn on_create(&mut self, params: &LaunchParams) -> Result<(), ShimError> {
        if self.phase != ShimPhase::Launching {
            warn!("on_create called in phase {:?}", self.phase);
            return Ok(());
        }

        match self.prepare(params) {
            Ok(redirector) => {
                self.redirector = Some(redirector);
                self.transition(LifecycleEvent::Created);
                Ok(())
            }
            Err(e) => {
                error!("Shim creation failed: {e}");
                self.transition(LifecycleEvent::CreateFailed);
                self.host.show_message(&format!("Failed to load game: {e}"));
                self.host.finish();
                Err(e)
            }
        }
    }

    fn on_resume(&mut self) {
        if !self.transition(LifecycleEvent::Resumed) {
            return;
        }
        self.overlay.ensure_started();

        if self.config.periodic_reconcile && self.periodic.is_none() {
            self.periodic = Some(self.main_loop.post(ShimTask::PeriodicPass));
        }
    }

    fn on_pause(&mut self) {
        if !self.transition(LifecycleEvent::Paused) {
            return;
        }
        self.stop_periodic();
        self.cancel_focus_pass();
    }

    /// Tears everything down and restarts the process
    ///
    /// The engine's native state cannot be reset in-process, so the launcher
    /// is relaunched in a clean task and this process ends.
    fn on_destroy(&mut self) {
        if !self.transition(LifecycleEvent::Destroyed) {
            return;
        }
        self.overlay.stop();

        self.main_loop.clear();
        self.periodic = None;
        self.focus_pass = None;
        self.enforcer.disable();

        self.host.relaunch_launcher(&LaunchRequest::clean_task());
        self.host.finish_and_remove_task();
        self.host.terminate_process();
    }

    /// Schedules a deferred pass when focus arrives
    ///
    /// The delay lets the engine finish its own surface setup before the
    /// shim overrides it. Repeated focus gains restart the delay.
    fn on_window_focus_changed(&mut self, has_focus: bool) {
        self.cancel_focus_pass();
        if !has_focus || self.phase.is_terminal() || self.phase == ShimPhase::Launching {
            return;
        }
        let delay = Duration::from_millis(self.config.focus_delay_ms);
        self.focus_pass = Some(self.main_loop.post_delayed(ShimTask::FocusPass, delay));
    }

    fn dispatch_key_event(&mut self, code: i32, action: KeyAction) -> bool {
        self.router().route_key(code, action)
    }

    fn dispatch_touch_event(&mut self, event: &MotionEvent) -> bool {
        self.router().route_touch(event)
    }

    fn dispatch_generic_motion_event(&mut self, event: &MotionEvent) -> bool {
        self.router().route_generic_motion(event)
    }

    fn files_dir(&self) -> PathBuf {
        self.storage_path(StorageKind::Files)
    }

    fn data_dir(&self) -> PathBuf {
        self.storage_path(StorageKind::Data)
    }

    fn external_files_dir(&self, subtype: Option<&str>) -> PathBuf {
        self.storage_path(StorageKind::ExternalFiles(subtype.map(str::to_string)))
    }

    fn database_path(&self, name: &str) -> PathBuf {
        self.storage_path(StorageKind::Database(name.to_string()))
    }

    fn cache_dir(&self) -> PathBuf {
        self.storage_path(StorageKind::Cache)
    }
}
