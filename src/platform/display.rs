//! Real display metrics
//!
//! The enforcer derives its target from the physical pixel size of the
//! display, not from the (possibly already shrunk) surface.

use std::cell::Cell;
use std::rc::Rc;

use crate::domain::core::Size;

/// Error types for display queries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("Display metrics unavailable: {0}")]
    Unavailable(String),

    #[error("Display reported an empty size")]
    Empty,
}

/// Source of the real (unscaled) display size
pub trait DisplayMetrics {
    fn real_size(&self) -> Result<Size, DisplayError>;
}

impl<T: DisplayMetrics + ?Sized> DisplayMetrics for Rc<T> {
    fn real_size(&self) -> Result<Size, DisplayError> {
        (**self).real_size()
    }
}

/// Display with a known size, adjustable at runtime (rotation, tests)
#[derive(Debug)]
pub struct FixedDisplay {
    size: Cell<Option<Size>>,
}

impl FixedDisplay {
    pub fn new(size: Size) -> Self {
        Self {
            size: Cell::new(Some(size)),
        }
    }

    /// A display whose metrics cannot be read
    pub fn unavailable() -> Self {
        Self {
            size: Cell::new(None),
        }
    }

    pub fn set(&self, size: Option<Size>) {
        self.size.set(size);
    }
}

impl DisplayMetrics for FixedDisplay {
    fn real_size(&self) -> Result<Size, DisplayError> {
        match self.size.get() {
            Some(size) if size.is_empty() => Err(DisplayError::Empty),
            Some(size) => Ok(size),
            None => Err(DisplayError::Unavailable("no display attached".to_string())),
        }
    }
}

#[cfg(windows)]
pub use system::SystemDisplay;

#[cfg(windows)]
mod system {
    use super::{DisplayError, DisplayMetrics};
    use crate::domain::core::Size;
    use windows::Win32::Foundation::{FALSE, POINT};
    use windows::Win32::Graphics::Gdi::{
        GetMonitorInfoW, MONITOR_DEFAULTTOPRIMARY, MONITORINFO, MonitorFromPoint,
    };
    use windows::Win32::UI::HiDpi::{
        DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
    };

    /// Primary monitor of the current Windows session, in physical pixels
    #[derive(Debug)]
    pub struct SystemDisplay;

    impl SystemDisplay {
        /// Opts the process into per-monitor DPI awareness so that monitor
        /// rectangles come back in real pixels instead of scaled ones.
        pub fn new() -> Self {
            // Fails harmlessly when awareness was already set by the host.
            let _ = unsafe {
                SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2)
            };
            Self
        }
    }

    impl DisplayMetrics for SystemDisplay {
        fn real_size(&self) -> Result<Size, DisplayError> {
            unsafe {
                let hmonitor = MonitorFromPoint(POINT { x: 0, y: 0 }, MONITOR_DEFAULTTOPRIMARY);
                if hmonitor.is_invalid() {
                    return Err(DisplayError::Unavailable(
                        "no primary monitor".to_string(),
                    ));
                }

                let mut info = MONITORINFO {
                    cbSize: std::mem::size_of::<MONITORINFO>() as u32,
                    ..Default::default()
                };
                if GetMonitorInfoW(hmonitor, &mut info) == FALSE {
                    return Err(DisplayError::Unavailable(format!(
                        "GetMonitorInfoW failed for {:?}",
                        hmonitor
                    )));
                }

                let rect = info.rcMonitor;
                let width = (rect.right - rect.left).max(0) as u32;
                let height = (rect.bottom - rect.top).max(0) as u32;
                let size = Size::new(width, height);
                if size.is_empty() {
                    return Err(DisplayError::Empty);
                }
                Ok(size)
            }
        }
    }

}
