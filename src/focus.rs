//! The orchestrator that runs one focus move from start to finish.
//!
//! [`FocusNavigator`] reads the client list and the active window, filters
//! the list down to the current desktop, resolves window centers, picks a
//! target with [`select_closest`] and asks the window manager to activate it.

use crate::clients::{active_client, client_list, filter_clients, WindowHandle};
use crate::command::Direction;
use crate::geometry::{center, WindowGeometry};
use crate::property::{PropertyError, STATE_SKIP_PAGER};
use crate::selector::select_closest;
use crate::traits::WindowSystem;
use log::{debug, info, warn};

/// Errors that abort a focus move.
#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    /// Neither `_NET_CLIENT_LIST` nor `_WIN_CLIENT_LIST` could be read.
    #[error("cannot get client list properties (_NET_CLIENT_LIST or _WIN_CLIENT_LIST): {0}")]
    ClientList(#[source] PropertyError),

    /// Neither `_NET_CURRENT_DESKTOP` nor `_WIN_WORKSPACE` could be read.
    #[error("cannot get current desktop properties (_NET_CURRENT_DESKTOP or _WIN_WORKSPACE): {0}")]
    CurrentDesktop(#[source] PropertyError),

    /// The active window's position could not be determined.
    #[error("cannot get geometry of active window {window}: {reason}")]
    Geometry { window: WindowHandle, reason: String },

    /// The window system rejected a request.
    #[error("window system error: {0}")]
    WindowSystem(String),
}

/// Runs the enumerate, filter, select and activate pipeline against a
/// [`WindowSystem`].
///
/// # Typical usage
///
/// ```ignore
/// let session = X11Session::connect(None)?;
/// let nav = FocusNavigator::new(session);
/// nav.focus(Direction::Left, 50)?;
/// ```
pub struct FocusNavigator<W: WindowSystem> {
    ws: W,
    skip_states: Vec<String>,
}

impl<W: WindowSystem> FocusNavigator<W> {
    /// Create a navigator that skips windows flagged
    /// `_NET_WM_STATE_SKIP_PAGER`.
    pub fn new(ws: W) -> Self {
        Self {
            ws,
            skip_states: vec![STATE_SKIP_PAGER.to_string()],
        }
    }

    /// Exclude windows carrying any of `states` as well.
    ///
    /// `_NET_WM_STATE_SKIP_PAGER` always stays in the list.  Names already
    /// present are not added twice.
    pub fn add_skip_states<I>(&mut self, states: I)
    where
        I: IntoIterator<Item = String>,
    {
        for state in states {
            if !self.skip_states.contains(&state) {
                self.skip_states.push(state);
            }
        }
    }

    /// Borrow the underlying window system.
    pub fn window_system(&self) -> &W {
        &self.ws
    }

    /// Pick the window focus should move to, without activating it.
    ///
    /// Returns `Ok(None)` when there is no active window to measure from or
    /// no window lies in `direction`.
    pub fn select(
        &self,
        direction: Direction,
        min_dist: u32,
    ) -> Result<Option<WindowHandle>, FocusError> {
        let clients = client_list(&self.ws).map_err(FocusError::ClientList)?;
        let active = active_client(&self.ws);

        let skip_flags = self.skip_flags();
        let candidates = filter_clients(&self.ws, clients, active, &skip_flags)
            .map_err(FocusError::CurrentDesktop)?;
        debug!("{} candidate(s) after filtering", candidates.len());

        let Some(active) = active else {
            info!("no active window, nothing to move from");
            return Ok(None);
        };

        let origin = center(&self.ws, active).map_err(|e| FocusError::Geometry {
            window: active,
            reason: e.to_string(),
        })?;

        let positioned: Vec<(WindowHandle, WindowGeometry)> = candidates
            .into_iter()
            .filter_map(|w| match center(&self.ws, w) {
                Ok(g) => Some((w, g)),
                Err(e) => {
                    warn!("{}: cannot get geometry, skipping: {}", w, e);
                    None
                }
            })
            .collect();

        let target = select_closest(origin, &positioned, direction, min_dist);
        match target {
            Some(w) => debug!("moving focus {} to {}", direction, w),
            None => debug!("no window {} of {}", direction, active),
        }
        Ok(target)
    }

    /// Ask the window manager to focus `window` and bring it to the front.
    ///
    /// A failed `_NET_ACTIVE_WINDOW` message is logged and the window is
    /// still mapped and raised.
    pub fn activate(&self, window: WindowHandle) -> Result<(), FocusError> {
        if let Err(e) = self.ws.request_activation(window) {
            warn!("cannot send _NET_ACTIVE_WINDOW event: {}", e);
        }
        self.ws
            .map_raised(window)
            .map_err(|e| FocusError::WindowSystem(e.to_string()))
    }

    /// Select and activate in one go.  Returns the window that was
    /// activated, if any.
    pub fn focus(
        &self,
        direction: Direction,
        min_dist: u32,
    ) -> Result<Option<WindowHandle>, FocusError> {
        let target = self.select(direction, min_dist)?;
        if let Some(window) = target {
            self.activate(window)?;
        }
        Ok(target)
    }

    fn skip_flags(&self) -> Vec<u32> {
        self.skip_states
            .iter()
            .filter_map(|name| match self.ws.intern_atom(name) {
                Ok(atom) => Some(atom),
                Err(e) => {
                    warn!("cannot intern {}: {}", name, e);
                    None
                }
            })
            .collect()
    }
}
