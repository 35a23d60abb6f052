//! Shim state management
//!
//! Two small state machines: the host lifecycle phase the shim is in, and
//! whether resolution enforcement is currently applied.

use crate::domain::core::SurfaceTarget;

/// Resolution enforcement state, owned by the enforcer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EnforcementState {
    /// Engine renders at whatever size it chooses
    #[default]
    Disabled,
    /// Surface is pinned to `target`
    Applied(SurfaceTarget),
}

impl EnforcementState {
    pub fn target(&self) -> Option<&SurfaceTarget> {
        match self {
            EnforcementState::Disabled => None,
            EnforcementState::Applied(target) => Some(target),
        }
    }
}

/// Host lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShimPhase {
    /// Constructed, `on_create` not yet run
    #[default]
    Launching,
    Created,
    Resumed,
    Paused,
    Destroyed,
    /// `on_create` failed; the shim is finishing
    Failed,
}

impl ShimPhase {
    /// True once the shim can no longer do useful work
    pub fn is_terminal(self) -> bool {
        matches!(self, ShimPhase::Destroyed | ShimPhase::Failed)
    }

    pub fn is_foreground(self) -> bool {
        self == ShimPhase::Resumed
    }
}

/// Lifecycle transition events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Created,
    CreateFailed,
    Resumed,
    Paused,
    Destroyed,
}

/// State machine for lifecycle transitions
pub struct PhaseMachine;

impl PhaseMachine {
    /// Processes a lifecycle event and returns the new phase
    ///
    /// Invalid transitions are ignored and leave the phase unchanged.
    pub fn process_event(current: ShimPhase, event: LifecycleEvent) -> ShimPhase {
        use LifecycleEvent as E;
        use ShimPhase as P;

        match (current, event) {
            (P::Launching, E::Created) => P::Created,
            (P::Launching, E::CreateFailed) => P::Failed,

            (P::Created | P::Paused, E::Resumed) => P::Resumed,
            (P::Resumed, E::Paused) => P::Paused,

            // The host may destroy from any live phase
            (P::Launching | P::Created | P::Resumed | P::Paused, E::Destroyed) => P::Destroyed,
            (P::Failed, E::Destroyed) => P::Destroyed,

            (phase, _) => phase,
        }
    }

    /// Whether `event` would change `current`
    pub fn accepts(current: ShimPhase, event: LifecycleEvent) -> bool {
        Self::process_event(current, event) != current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::Size;

    #[test]
    fn default_phase_is_launching() {
        assert_eq!(ShimPhase::default(), ShimPhase::Launching);
        assert_eq!(EnforcementState::default(), EnforcementState::Disabled);
    }

    #[test]
    fn normal_lifecycle() {
        let mut phase = ShimPhase::Launching;
        for (event, expected) in [
            (LifecycleEvent::Created, ShimPhase::Created),
            (LifecycleEvent::Resumed, ShimPhase::Resumed),
            (LifecycleEvent::Paused, ShimPhase::Paused),
            (LifecycleEvent::Resumed, ShimPhase::Resumed),
            (LifecycleEvent::Destroyed, ShimPhase::Destroyed),
        ] {
            phase = PhaseMachine::process_event(phase, event);
            assert_eq!(phase, expected);
        }
        assert!(phase.is_terminal());
    }

    #[test]
    fn resume_before_create_is_ignored() {
        assert!(!PhaseMachine::accepts(ShimPhase::Launching, LifecycleEvent::Resumed));
    }

    #[test]
    fn nothing_leaves_destroyed() {
        for event in [
            LifecycleEvent::Created,
            LifecycleEvent::Resumed,
            LifecycleEvent::Paused,
            LifecycleEvent::Destroyed,
        ] {
            assert_eq!(
                PhaseMachine::process_event(ShimPhase::Destroyed, event),
                ShimPhase::Destroyed
            );
        }
    }

    #[test]
    fn failed_create_can_only_be_destroyed() {
        let phase = PhaseMachine::process_event(ShimPhase::Launching, LifecycleEvent::CreateFailed);
        assert_eq!(phase, ShimPhase::Failed);
        assert!(!PhaseMachine::accepts(phase, LifecycleEvent::Resumed));
        assert_eq!(
            PhaseMachine::process_event(phase, LifecycleEvent::Destroyed),
            ShimPhase::Destroyed
        );
    }

    #[test]
    fn destroy_before_create_is_accepted() {
        assert_eq!(
            PhaseMachine::process_event(ShimPhase::Launching, LifecycleEvent::Destroyed),
            ShimPhase::Destroyed
        );
    }

    #[test]
    fn pause_requires_resume() {
        assert!(!PhaseMachine::accepts(ShimPhase::Created, LifecycleEvent::Paused));
        assert!(PhaseMachine::accepts(ShimPhase::Resumed, LifecycleEvent::Paused));
    }

    #[test]
    fn applied_state_exposes_target() {
        let target = SurfaceTarget::compute(Size::new(1920, 1080), 0.5).unwrap();
        let state = EnforcementState::Applied(target);
        assert_eq!(state.target().map(|t| t.size), Some(Size::new(960, 540)));
        assert!(EnforcementState::Disabled.target().is_none());
    }
}
