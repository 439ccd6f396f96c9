//! Directional nearest-neighbour selection.
//!
//! Given the center of the active window and the centers of the candidate
//! windows, [`select_closest`] picks the candidate that lies in the requested
//! direction at the smallest Manhattan distance.
//!
//! Offsets smaller than `min_dist` on an axis are snapped to zero first.  A
//! window slightly above and far to the right therefore counts as "directly
//! to the right", while a window that is only slightly to the right does
//! not count as "right" at all.

use crate::clients::WindowHandle;
use crate::command::Direction;
use crate::geometry::WindowGeometry;
use log::debug;

/// Zero out `delta` when its magnitude is below `min_dist`.
pub fn snap(delta: i64, min_dist: u32) -> i64 {
    if delta.abs() < i64::from(min_dist) {
        0
    } else {
        delta
    }
}

/// Whether a snapped `(dx, dy)` lies in `direction`.
///
/// The constrained axis must have exactly the direction's sign; zero does
/// not qualify.  The other axis may be anything.
pub fn in_direction(dx: i64, dy: i64, direction: Direction) -> bool {
    let (dir_x, dir_y) = direction.axis();
    (dir_x == 0 || dx.signum() == dir_x) && (dir_y == 0 || dy.signum() == dir_y)
}

/// Pick the nearest candidate in `direction` from `active`.
///
/// `candidates` must be in client-list order: on equal distance the earlier
/// one wins.  Returns `None` when no candidate lies in `direction`.
pub fn select_closest(
    active: WindowGeometry,
    candidates: &[(WindowHandle, WindowGeometry)],
    direction: Direction,
    min_dist: u32,
) -> Option<WindowHandle> {
    let mut best: Option<(WindowHandle, i64)> = None;

    for &(window, pos) in candidates {
        let dx = snap(i64::from(pos.center_x) - i64::from(active.center_x), min_dist);
        let dy = snap(i64::from(pos.center_y) - i64::from(active.center_y), min_dist);

        if !in_direction(dx, dy, direction) {
            continue;
        }

        let dist = dx.abs() + dy.abs();
        debug!("{} is {} of active at distance {}", window, direction, dist);
        match best {
            Some((_, d)) if d <= dist => {}
            _ => best = Some((window, dist)),
        }
    }

    best.map(|(window, _)| window)
}
