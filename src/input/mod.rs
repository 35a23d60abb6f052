//! Input handling
//!
//! Decoded host input events and the router that offers them to the overlay
//! before the engine.

pub mod events;
pub mod router;

pub use events::{KeyAction, MotionAction, MotionEvent};
pub use router::{EngineInput, InputRouter};
