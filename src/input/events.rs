//! Input events as the host delivers them
//!
//! Hosts forward raw action codes; these types decode them once so the
//! router can branch on meaning instead of integers.

/// Key action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
    Multiple,
    /// Unrecognised code, passed through untouched
    Other(i32),
}

impl KeyAction {
    /// Convert a host key action code to a KeyAction
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 => KeyAction::Down,
            1 => KeyAction::Up,
            2 => KeyAction::Multiple,
            other => KeyAction::Other(other),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            KeyAction::Down => 0,
            KeyAction::Up => 1,
            KeyAction::Multiple => 2,
            KeyAction::Other(code) => code,
        }
    }
}

/// Pointer / motion action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    Down,
    Up,
    Move,
    Cancel,
    HoverMove,
    Scroll,
    ButtonPress,
    ButtonRelease,
    Other(i32),
}

impl MotionAction {
    /// Convert a host motion action code to a MotionAction
    pub fn from_raw(code: i32) -> Self {
        match code {
            0 => MotionAction::Down,
            1 => MotionAction::Up,
            2 => MotionAction::Move,
            3 => MotionAction::Cancel,
            7 => MotionAction::HoverMove,
            8 => MotionAction::Scroll,
            11 => MotionAction::ButtonPress,
            12 => MotionAction::ButtonRelease,
            other => MotionAction::Other(other),
        }
    }

    pub fn is_button(self) -> bool {
        matches!(self, MotionAction::ButtonPress | MotionAction::ButtonRelease)
    }
}

/// Touch, mouse or scroll event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    pub x: f32,
    pub y: f32,
    /// Vertical scroll axis; positive scrolls up
    pub vscroll: f32,
    pub hscroll: f32,
}

impl MotionEvent {
    pub fn new(action: MotionAction, x: f32, y: f32) -> Self {
        Self {
            action,
            x,
            y,
            vscroll: 0.0,
            hscroll: 0.0,
        }
    }

    pub fn scroll(x: f32, y: f32, vscroll: f32) -> Self {
        Self {
            vscroll,
            ..Self::new(MotionAction::Scroll, x, y)
        }
    }
}
