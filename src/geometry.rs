//! Window positions.

use crate::clients::WindowHandle;
use crate::traits::WindowSystem;

/// Position and size of a window as the server reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Top-left corner, possibly relative to the parent window.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Center of a window in root-window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowGeometry {
    pub center_x: i32,
    pub center_y: i32,
}

impl WindowGeometry {
    pub fn new(center_x: i32, center_y: i32) -> Self {
        Self { center_x, center_y }
    }

    /// Center of a window whose top-left corner is at `(x, y)` in root
    /// coordinates.  Half sizes are rounded down.
    pub fn from_origin(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            center_x: x.saturating_add((width / 2) as i32),
            center_y: y.saturating_add((height / 2) as i32),
        }
    }
}

/// Compute the center of `window` in root-window coordinates.
///
/// Reparenting window managers put clients inside frame windows, so the
/// position from [`WindowSystem::geometry`] is relative to the frame.  The
/// window's own top-left corner, `(0, 0)` in its coordinate space, is
/// translated to the root instead, and only the size is taken from the
/// geometry.
pub fn center<W: WindowSystem + ?Sized>(
    ws: &W,
    window: WindowHandle,
) -> Result<WindowGeometry, W::Error> {
    let frame = ws.geometry(window)?;
    let (x, y) = ws.translate_to_root(window, 0, 0)?;
    Ok(WindowGeometry::from_origin(x, y, frame.width, frame.height))
}
