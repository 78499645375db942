//! Core traits that decouple the tiling engine from any specific compositor.
//!
//! The engine never reaches for ambient globals: every host capability is
//! passed in through one of these traits at construction time. A concrete
//! implementation might
//! talk to a Wayland compositor over IPC, or it might be a recording stub
//! used in tests.

use crate::rect::Rect;
use std::fmt;

/// Opaque window identity assigned by the host compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Modifier-key bitmask as reported alongside the pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModMask(pub u32);

impl ModMask {
    pub const CTRL: ModMask = ModMask(1 << 0);
    pub const ALT: ModMask = ModMask(1 << 1);
    pub const SUPER: ModMask = ModMask(1 << 2);

    /// Whether every bit of `other` is set in `self`.
    pub fn contains(&self, other: ModMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ModMask {
    type Output = ModMask;
    fn bitor(self, rhs: ModMask) -> ModMask {
        ModMask(self.0 | rhs.0)
    }
}

/// A pointer sample: position in global pixel coordinates plus the modifier
/// keys held at that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub mods: ModMask,
}

/// Direction for keyboard-driven window movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// The kind of grab operation the compositor reported on grab-begin.
///
/// The drag state machine only engages for the moving variants; resize grabs
/// pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabOp {
    Moving,
    KeyboardMoving,
    Resizing,
    KeyboardResizing,
}

impl GrabOp {
    /// Whether this grab moves the window (pointer- or keyboard-driven).
    pub fn is_moving(&self) -> bool {
        matches!(self, GrabOp::Moving | GrabOp::KeyboardMoving)
    }
}

/// Abstraction over the host compositor's window and input surface.
///
/// All methods are queries or fire-and-forget commands; the engine treats
/// any error as "no tiling assistance this tick" and recovers by guard-and-
/// return, so implementations are free to fail on vanished windows.
pub trait Compositor {
    /// The error type produced by this compositor backend.
    type Error: std::error::Error + Send + 'static;

    /// Sample the pointer position and modifier state.
    fn pointer(&self) -> Result<PointerState, Self::Error>;

    /// Current frame rectangle of `window`, or `None` if the window is gone.
    fn frame_rect(&self, window: WindowId) -> Result<Option<Rect>, Self::Error>;

    /// Move and resize `window` to `rect`. `user_op` marks the change as
    /// user-initiated for the compositor's focus/animation policy.
    fn move_resize_frame(
        &self,
        window: WindowId,
        rect: Rect,
        user_op: bool,
    ) -> Result<(), Self::Error>;

    fn maximize(&self, window: WindowId) -> Result<(), Self::Error>;

    fn unmaximize(&self, window: WindowId) -> Result<(), Self::Error>;

    fn is_maximized(&self, window: WindowId) -> Result<bool, Self::Error>;

    /// Whether the window may be maximized at all (some dialogs cannot).
    fn can_maximize(&self, window: WindowId) -> Result<bool, Self::Error>;

    /// Whether the window currently allows interactive move/resize.
    fn allows_move_resize(&self, window: WindowId) -> Result<bool, Self::Error>;
}

//  Timers

/// Handle to a scheduled repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Abstraction over the host event loop's timer facility.
///
/// The engine schedules its drag poll through this trait and the host calls
/// [`TilingManager::poll_tick`](crate::manager::TilingManager::poll_tick)
/// each time the handle fires. Cancellation is explicit and the engine
/// cancels its handle **before** releasing any other state on grab-end and
/// teardown, so a fired callback can never observe a half-dismantled engine.
pub trait TimerService {
    /// Schedule a repeating timer with the given interval in milliseconds.
    fn schedule_repeating(&mut self, interval_ms: u64) -> TimerHandle;

    /// Cancel a previously scheduled timer. Cancelling an already-cancelled
    /// handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

//  Overlay events

/// Events sent from the engine to an overlay renderer over an
/// [`mpsc`](std::sync::mpsc) channel.
///
/// The engine holds an `Option<mpsc::Sender<OverlayEvent>>`. Any independent
/// listener (a layer-shell overlay, a debug logger) can consume these
/// without being owned by the engine; rendering itself stays entirely on the
/// host side.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// The tiling grid was opened; `previews` are the current preview
    /// rectangles in pixel space.
    GridOpened { previews: Vec<Rect> },

    /// The preview set changed while the grid is open (hover split/merge).
    GridUpdated { previews: Vec<Rect> },

    /// The tiling grid was closed; all previews disappear.
    GridClosed,

    /// The selection preview (the rectangle the window would snap to on
    /// release) moved or resized.
    SelectionChanged { rect: Rect },

    /// No tile is selected any more.
    SelectionCleared,

    /// An edge-tiling preview (quarter / half / maximize) should be shown.
    EdgePreviewShown { rect: Rect },

    /// The edge-tiling preview should be hidden.
    EdgePreviewHidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modmask_contains_checks_all_bits() {
        let held = ModMask::CTRL | ModMask::SUPER;
        assert!(held.contains(ModMask::CTRL));
        assert!(held.contains(ModMask::SUPER));
        assert!(held.contains(ModMask::CTRL | ModMask::SUPER));
        assert!(!held.contains(ModMask::ALT));
        assert!(!held.contains(ModMask::CTRL | ModMask::ALT));
    }

    #[test]
    fn empty_mask_is_contained_in_anything() {
        assert!(ModMask::default().contains(ModMask::default()));
        assert!(ModMask::ALT.contains(ModMask::default()));
    }

    #[test]
    fn grab_op_moving_filter() {
        assert!(GrabOp::Moving.is_moving());
        assert!(GrabOp::KeyboardMoving.is_moving());
        assert!(!GrabOp::Resizing.is_moving());
        assert!(!GrabOp::KeyboardResizing.is_moving());
    }

    #[test]
    fn window_id_displays_as_hex_address() {
        assert_eq!(WindowId(0xbeef).to_string(), "0xbeef");
    }
}
