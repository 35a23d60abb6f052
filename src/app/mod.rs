//! Lifecycle orchestration layer
//!
//! This module coordinates the storage, view, input and overlay layers
//! against the host window's lifecycle. Everything here runs on the thread
//! that owns the view tree.

pub mod controller;
pub mod enforcer;
pub mod hooks;
pub mod main_loop;
pub mod state;

pub use controller::{Collaborators, ShimController, ShimError, ShimTask};
pub use enforcer::{EnforceError, PassOutcome, ResizeSink, ResolutionEnforcer};
pub use hooks::{HostEnvironment, LaunchRequest, ShimHooks};
pub use main_loop::{LoopSender, MainLoop, TaskId};
pub use state::{EnforcementState, LifecycleEvent, PhaseMachine, ShimPhase};
