//! Resolution enforcement against an engine that keeps resetting it
//!
//! Each call is one reconciliation pass: locate the surface afresh, compare
//! it with the target derived from the display, and correct any drift. A
//! pass over an already aligned surface touches nothing, so passes from
//! different triggers can interleave freely.
//!
//! Must only be driven from the UI-owning thread. The size listener it
//! registers may fire on any thread and therefore only forwards the
//! reported size to a [`ResizeSink`].

use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::state::EnforcementState;
use crate::domain::core::{Size, SurfaceTarget, TargetError, requires_enforcement};
use crate::platform::display::{DisplayError, DisplayMetrics};
use crate::view::surface::{ListenerId, RenderSurface, SurfaceError, SurfaceHandle};
use crate::view::tree::{SurfaceLocator, ViewNode};

/// Where reported surface sizes go; must marshal onto the UI thread
pub type ResizeSink = Arc<dyn Fn(Size) + Send + Sync>;

/// Anything that can go wrong inside one pass
#[derive(Debug, thiserror::Error)]
pub enum EnforceError {
    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Result of a reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassOutcome {
    /// Scale is native; nothing to enforce
    NotScaled,
    /// No rendering surface exists yet
    NoSurface,
    /// Surface already matched the target; nothing was touched
    Aligned(SurfaceTarget),
    /// Buffer, layout and transform were set from scratch
    Applied(SurfaceTarget),
    /// An engine-side resize was undone
    Corrected(SurfaceTarget),
    /// The pass failed and will be retried on the next trigger
    Deferred,
}

#[derive(Debug)]
struct Registration {
    surface: SurfaceHandle,
    id: ListenerId,
}

/// Owns the enforcement state and the surface size listener
pub struct ResolutionEnforcer {
    state: EnforcementState,
    registration: Option<Registration>,
    sink: ResizeSink,
}

impl ResolutionEnforcer {
    pub fn new(sink: ResizeSink) -> Self {
        Self {
            state: EnforcementState::Disabled,
            registration: None,
            sink,
        }
    }

    pub fn state(&self) -> EnforcementState {
        self.state
    }

    pub fn has_listener(&self) -> bool {
        self.registration.is_some()
    }

    /// Runs one enforcement pass
    ///
    /// # Arguments
    /// * `root` - Current root of the view tree, if the host has one
    /// * `scale` - Render scale read from settings for this pass
    /// * `display` - Source of the real display size
    ///
    /// Failures are logged and reported as [`PassOutcome::Deferred`].
    pub fn apply_scale(
        &mut self,
        root: Option<&Rc<dyn ViewNode>>,
        scale: f32,
        display: &dyn DisplayMetrics,
    ) -> PassOutcome {
        match self.try_apply_scale(root, scale, display) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Resolution pass failed, retrying on next trigger: {e}");
                PassOutcome::Deferred
            }
        }
    }

    fn try_apply_scale(
        &mut self,
        root: Option<&Rc<dyn ViewNode>>,
        scale: f32,
        display: &dyn DisplayMetrics,
    ) -> Result<PassOutcome, EnforceError> {
        if !requires_enforcement(scale) {
            self.disable();
            return Ok(PassOutcome::NotScaled);
        }

        let Some(handle) = root.and_then(SurfaceLocator::find) else {
            debug!("No rendering surface yet");
            return Ok(PassOutcome::NoSurface);
        };

        let target = SurfaceTarget::compute(display.real_size()?, scale)?;
        let surface = handle.upgrade()?;

        let outcome = if is_aligned(surface.as_ref(), &target) {
            PassOutcome::Aligned(target)
        } else {
            pin(surface.as_ref(), &target)?;
            info!(
                "Enforcing resolution {} (stretch {:.3})",
                target.size, target.stretch
            );
            PassOutcome::Applied(target)
        };

        self.state = EnforcementState::Applied(target);
        self.ensure_listener(&handle, surface.as_ref())?;
        Ok(outcome)
    }

    /// Handles a size reported by the surface listener
    ///
    /// Runs on the UI thread after the report was marshaled there.
    pub fn reconcile(&mut self, reported: Size) -> PassOutcome {
        let Some(target) = self.state.target().copied() else {
            return PassOutcome::NotScaled;
        };
        if reported == target.size {
            return PassOutcome::Aligned(target);
        }

        match self.try_restore(reported, target) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Could not restore enforced resolution: {e}");
                PassOutcome::Deferred
            }
        }
    }

    fn try_restore(
        &mut self,
        reported: Size,
        target: SurfaceTarget,
    ) -> Result<PassOutcome, EnforceError> {
        let Some(registration) = &self.registration else {
            return Ok(PassOutcome::NoSurface);
        };
        let surface = match registration.surface.upgrade() {
            Ok(surface) => surface,
            Err(e) => {
                // Engine recreated its surface; the next pass relocates it.
                self.registration = None;
                return Err(e.into());
            }
        };

        // A later pass may already have fixed it.
        if is_aligned(surface.as_ref(), &target) {
            return Ok(PassOutcome::Aligned(target));
        }

        pin(surface.as_ref(), &target)?;
        info!(
            "Engine resized surface to {}, restored {}",
            reported, target.size
        );
        Ok(PassOutcome::Corrected(target))
    }

    /// Drops enforcement and the listener without touching the surface
    pub fn disable(&mut self) {
        self.detach_listener();
        if let EnforcementState::Applied(target) = self.state {
            info!("Resolution enforcement disabled (was {})", target.size);
        }
        self.state = EnforcementState::Disabled;
    }

    fn ensure_listener(
        &mut self,
        handle: &SurfaceHandle,
        surface: &dyn RenderSurface,
    ) -> Result<(), SurfaceError> {
        if let Some(registration) = &self.registration {
            if registration.surface.same_surface(handle) {
                return Ok(());
            }
        }
        self.detach_listener();

        let sink = Arc::clone(&self.sink);
        let id = surface.add_size_listener(Box::new(move |size| sink(size)))?;
        debug!("Registered surface size listener {:?}", id);
        self.registration = Some(Registration {
            surface: handle.clone(),
            id,
        });
        Ok(())
    }

    fn detach_listener(&mut self) {
        if let Some(registration) = self.registration.take() {
            if let Ok(surface) = registration.surface.upgrade() {
                surface.remove_size_listener(registration.id);
            }
        }
    }
}

impl Drop for ResolutionEnforcer {
    fn drop(&mut self) {
        self.detach_listener();
    }
}

fn is_aligned(surface: &dyn RenderSurface, target: &SurfaceTarget) -> bool {
    surface.buffer_size() == target.size
        && surface.layout_size() == target.size
        && surface.transform().approx_eq(&target.transform())
}

/// Buffer and layout are always written; the transform only when it drifted
fn pin(surface: &dyn RenderSurface, target: &SurfaceTarget) -> Result<(), SurfaceError> {
    surface.set_fixed_buffer_size(target.size)?;
    surface.set_layout_size(target.size)?;
    let transform = target.transform();
    if !surface.transform().approx_eq(&transform) {
        surface.set_transform(transform)?;
    }
    Ok(())
}
