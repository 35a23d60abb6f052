//! Core domain types for resolution enforcement
//!
//! This module defines pure value types that work exclusively with real
//! pixels. Nothing here knows about views, threads or the host window.

use std::fmt;

/// Width/height pair in real pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Creates a new size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the area in square pixels
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Tolerance used when comparing transform factors
pub const SCALE_EPSILON: f32 = 1e-4;

/// Visual transform applied on top of a surface's layout box
///
/// The pivot is expressed in the surface's own coordinates; (0, 0) is the
/// top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualTransform {
    pub pivot_x: f32,
    pub pivot_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl VisualTransform {
    pub const IDENTITY: Self = Self {
        pivot_x: 0.0,
        pivot_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Uniform stretch anchored at the surface origin
    pub fn stretch_from_origin(factor: f32) -> Self {
        Self {
            pivot_x: 0.0,
            pivot_y: 0.0,
            scale_x: factor,
            scale_y: factor,
        }
    }

    /// Compares two transforms within [`SCALE_EPSILON`]
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.pivot_x - other.pivot_x).abs() <= SCALE_EPSILON
            && (self.pivot_y - other.pivot_y).abs() <= SCALE_EPSILON
            && (self.scale_x - other.scale_x).abs() <= SCALE_EPSILON
            && (self.scale_y - other.scale_y).abs() <= SCALE_EPSILON
    }
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Errors produced while deriving a surface target
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TargetError {
    #[error("Render scale {0} is outside (0, 1]")]
    InvalidScale(f32),

    #[error("Display {display} at scale {scale} collapses to an empty buffer")]
    Degenerate { display: Size, scale: f32 },
}

/// Returns true when a render scale asks for a sub-native buffer
///
/// NaN never enforces.
pub fn requires_enforcement(scale: f32) -> bool {
    scale < 1.0
}

/// Enforced render-buffer dimensions and the stretch that fills the display
///
/// Recomputed on every enforcement pass; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTarget {
    /// Buffer and layout size the surface must report
    pub size: Size,
    /// Visual scale factor on both axes (`1 / scale`)
    pub stretch: f32,
}

impl SurfaceTarget {
    /// Derives the target for a display at the given render scale
    ///
    /// # Arguments
    /// * `display` - Real display dimensions in pixels
    /// * `scale` - Render scale in (0, 1]
    ///
    /// # Returns
    /// `(floor(W * scale), floor(H * scale))` with stretch `1 / scale`
    pub fn compute(display: Size, scale: f32) -> Result<Self, TargetError> {
        if !scale.is_finite() || scale <= 0.0 || scale > 1.0 {
            return Err(TargetError::InvalidScale(scale));
        }

        // Single-precision product truncated toward zero, same as the host's
        // own float-to-int conversion of display metrics.
        let width = (display.width as f32 * scale).floor() as u32;
        let height = (display.height as f32 * scale).floor() as u32;
        let size = Size::new(width, height);

        if size.is_empty() {
            return Err(TargetError::Degenerate { display, scale });
        }

        Ok(Self {
            size,
            stretch: 1.0 / scale,
        })
    }

    /// Transform that stretches the reduced buffer back over the display
    pub fn transform(&self) -> VisualTransform {
        VisualTransform::stretch_from_origin(self.stretch)
    }
}
