//! User interface layer
//!
//! The overlay drawn on top of the engine and its lifetime management.

pub mod overlay;

pub use overlay::{OverlayCapability, OverlaySlot};
