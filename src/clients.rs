//! Client enumeration and desktop filtering.
//!
//! The window manager publishes the managed windows on the root window.
//! [`client_list`] reads them, [`active_client`] reads the focused one, and
//! [`filter_clients`] narrows the list down to windows that are worth
//! navigating to: not the active window, not hidden from pagers, and on the
//! current desktop (or on all desktops).
//!
//! Filtering never reorders.  The window manager's order is the tie-break
//! key for [`select_closest`](crate::selector::select_closest).

use crate::property::{
    get_with_fallbacks, PropertyError, ACTIVE_WINDOW, CLIENT_LIST, CURRENT_DESKTOP, WINDOW_DESKTOP,
    WINDOW_STATE,
};
use crate::traits::WindowSystem;
use log::{debug, warn};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a window, valid for the lifetime of one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u32);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Windows in the order the window manager reported them.
///
/// Entries are unique.  Filtering consumes a list and produces a new one, so
/// a list is only ever held by one stage at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientList(Vec<WindowHandle>);

impl ClientList {
    pub fn new(windows: impl IntoIterator<Item = WindowHandle>) -> Self {
        let mut seen = HashSet::new();
        Self(windows.into_iter().filter(|w| seen.insert(*w)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, window: WindowHandle) -> bool {
        self.0.contains(&window)
    }

    pub fn iter(&self) -> impl Iterator<Item = WindowHandle> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[WindowHandle] {
        &self.0
    }
}

impl IntoIterator for ClientList {
    type Item = WindowHandle;
    type IntoIter = std::vec::IntoIter<WindowHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Which desktop a window lives on.
///
/// On the wire this is a CARDINAL where `0xFFFFFFFF` (`-1`) means "all
/// desktops".  It is decoded into this form as soon as it is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesktopIndex {
    /// Shown on every desktop.
    Sticky,
    Index(u32),
}

impl DesktopIndex {
    pub const STICKY_RAW: u32 = 0xFFFF_FFFF;

    pub fn from_raw(raw: u32) -> Self {
        if raw == Self::STICKY_RAW {
            DesktopIndex::Sticky
        } else {
            DesktopIndex::Index(raw)
        }
    }

    /// Whether a window on `self` is visible while `current` is shown.
    pub fn is_visible_on(self, current: DesktopIndex) -> bool {
        self == DesktopIndex::Sticky || self == current
    }
}

impl fmt::Display for DesktopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesktopIndex::Sticky => write!(f, "sticky"),
            DesktopIndex::Index(n) => write!(f, "{}", n),
        }
    }
}

/// Read the list of managed windows from the root window.
///
/// Tries `_NET_CLIENT_LIST`, then `_WIN_CLIENT_LIST`.
pub fn client_list<W: WindowSystem + ?Sized>(ws: &W) -> Result<ClientList, PropertyError> {
    let buf = get_with_fallbacks(ws, ws.root(), CLIENT_LIST)?;
    let list = ClientList::new(buf.values32().map(WindowHandle));
    debug!("{} client(s) in client list", list.len());
    Ok(list)
}

/// Read the currently active window, or `None` if nothing has focus.
pub fn active_client<W: WindowSystem + ?Sized>(ws: &W) -> Option<WindowHandle> {
    let buf = match get_with_fallbacks(ws, ws.root(), ACTIVE_WINDOW) {
        Ok(buf) => buf,
        Err(e) => {
            debug!("no active client: {}", e);
            return None;
        }
    };
    // A window manager reports "no focus" as window 0.
    buf.first32().filter(|&id| id != 0).map(WindowHandle)
}

/// Read the desktop currently shown.
///
/// Tries `_NET_CURRENT_DESKTOP`, then `_WIN_WORKSPACE`.
pub fn current_desktop<W: WindowSystem + ?Sized>(ws: &W) -> Result<DesktopIndex, PropertyError> {
    let buf = get_with_fallbacks(ws, ws.root(), CURRENT_DESKTOP)?;
    let raw = buf
        .first32()
        .ok_or_else(|| PropertyError::unavailable(CURRENT_DESKTOP[0].name))?;
    Ok(DesktopIndex::from_raw(raw))
}

/// Read the desktop `window` is assigned to.
///
/// Tries `_NET_WM_DESKTOP`, then `_WIN_WORKSPACE`.
pub fn window_desktop<W: WindowSystem + ?Sized>(
    ws: &W,
    window: WindowHandle,
) -> Result<DesktopIndex, PropertyError> {
    let buf = get_with_fallbacks(ws, window, WINDOW_DESKTOP)?;
    let raw = buf
        .first32()
        .ok_or_else(|| PropertyError::unavailable(WINDOW_DESKTOP[0].name))?;
    Ok(DesktopIndex::from_raw(raw))
}

/// Whether `window`'s `_NET_WM_STATE` contains any atom in `flags`.
///
/// A window without a readable state list carries no flags.
pub fn has_any_state<W: WindowSystem + ?Sized>(
    ws: &W,
    window: WindowHandle,
    flags: &[u32],
) -> bool {
    if flags.is_empty() {
        return false;
    }
    match get_with_fallbacks(ws, window, WINDOW_STATE) {
        Ok(buf) => buf.values32().any(|atom| flags.contains(&atom)),
        Err(e) => {
            debug!("{}: {}", window, e);
            false
        }
    }
}

/// Keep the clients that focus may move to.
///
/// In list order, a client is dropped when it is `active`, when its state
/// contains one of `skip_flags`, or when its desktop cannot be read.  It is
/// kept when its desktop is sticky or equals the current desktop.
///
/// Fails only when the current desktop itself cannot be determined.
pub fn filter_clients<W: WindowSystem + ?Sized>(
    ws: &W,
    clients: ClientList,
    active: Option<WindowHandle>,
    skip_flags: &[u32],
) -> Result<ClientList, PropertyError> {
    let current = current_desktop(ws)?;
    debug!("current desktop is {}", current);

    let kept: Vec<WindowHandle> = clients
        .into_iter()
        .filter(|&w| Some(w) != active)
        .filter(|&w| {
            let skip = has_any_state(ws, w, skip_flags);
            if skip {
                debug!("{}: skipped by state", w);
            }
            !skip
        })
        .filter(|&w| match window_desktop(ws, w) {
            Ok(desktop) => desktop.is_visible_on(current),
            Err(e) => {
                warn!("{}: dropping window without desktop: {}", w, e);
                false
            }
        })
        .collect();

    Ok(ClientList(kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{PropertyType, STATE_SKIP_PAGER};
    use crate::testing::FakeDesktop;

    const A: WindowHandle = WindowHandle(0xa);
    const B: WindowHandle = WindowHandle(0xb);
    const C: WindowHandle = WindowHandle(0xc);
    const D: WindowHandle = WindowHandle(0xd);

    fn skip_flags(fake: &FakeDesktop) -> Vec<u32> {
        vec![fake.intern_atom(STATE_SKIP_PAGER).unwrap()]
    }

    #[test]
    fn sticky_sentinel_decodes() {
        assert_eq!(DesktopIndex::from_raw(0xFFFF_FFFF), DesktopIndex::Sticky);
        assert_eq!(DesktopIndex::from_raw(0), DesktopIndex::Index(0));
        assert_eq!(DesktopIndex::from_raw(3), DesktopIndex::Index(3));
    }

    #[test]
    fn visibility_rule() {
        let cur = DesktopIndex::Index(1);
        assert!(DesktopIndex::Sticky.is_visible_on(cur));
        assert!(DesktopIndex::Index(1).is_visible_on(cur));
        assert!(!DesktopIndex::Index(2).is_visible_on(cur));
    }

    #[test]
    fn client_list_dedups_and_keeps_order() {
        let list = ClientList::new([C, A, C, B, A]);
        assert_eq!(list.as_slice(), &[C, A, B]);
    }

    #[test]
    fn client_list_modern_name() {
        let mut fake = FakeDesktop::new();
        fake.set_root_property("_NET_CLIENT_LIST", PropertyType::Window, &[0xa, 0xb]);
        let list = client_list(&fake).unwrap();
        assert_eq!(list.as_slice(), &[A, B]);
    }

    #[test]
    fn client_list_legacy_name() {
        let mut fake = FakeDesktop::new();
        fake.set_root_property("_WIN_CLIENT_LIST", PropertyType::Cardinal, &[0xc]);
        let list = client_list(&fake).unwrap();
        assert_eq!(list.as_slice(), &[C]);
    }

    #[test]
    fn client_list_missing_fails() {
        let fake = FakeDesktop::new();
        assert!(client_list(&fake).is_err());
    }

    #[test]
    fn active_client_present_absent_and_zero() {
        let mut fake = FakeDesktop::new();
        assert_eq!(active_client(&fake), None);
        fake.set_root_property("_NET_ACTIVE_WINDOW", PropertyType::Window, &[0]);
        assert_eq!(active_client(&fake), None);
        fake.set_root_property("_NET_ACTIVE_WINDOW", PropertyType::Window, &[0xb]);
        assert_eq!(active_client(&fake), Some(B));
    }

    #[test]
    fn filter_drops_active_skipped_and_other_desktops() {
        let mut fake = FakeDesktop::new();
        fake.set_current_desktop(1);
        for w in [A, B, C, D] {
            fake.add_window(w, (0, 0), (10, 10));
        }
        fake.set_window_desktop(A, 1);
        fake.set_window_desktop(B, 1);
        fake.set_window_desktop(C, 0xFFFF_FFFF);
        fake.set_window_desktop(D, 2);
        fake.set_window_states(B, &[STATE_SKIP_PAGER]);

        let flags = skip_flags(&fake);
        let out = filter_clients(&fake, ClientList::new([A, B, C, D]), Some(A), &flags).unwrap();
        assert_eq!(out.as_slice(), &[C]);
    }

    #[test]
    fn filter_preserves_order() {
        let mut fake = FakeDesktop::new();
        fake.set_current_desktop(0);
        for w in [D, B, A, C] {
            fake.add_window(w, (0, 0), (10, 10));
            fake.set_window_desktop(w, 0);
        }
        let flags = skip_flags(&fake);
        let out = filter_clients(&fake, ClientList::new([D, B, A, C]), Some(B), &flags).unwrap();
        assert_eq!(out.as_slice(), &[D, A, C]);
    }

    #[test]
    fn filter_excludes_window_without_desktop() {
        let mut fake = FakeDesktop::new();
        fake.set_current_desktop(0);
        fake.add_window(A, (0, 0), (10, 10));
        fake.add_window(B, (0, 0), (10, 10));
        fake.set_window_desktop(B, 0);
        let flags = skip_flags(&fake);
        let out = filter_clients(&fake, ClientList::new([A, B]), None, &flags).unwrap();
        assert!(!out.contains(A));
        assert!(out.contains(B));
    }

    #[test]
    fn filter_uses_legacy_desktop_names() {
        let mut fake = FakeDesktop::new();
        fake.set_root_property("_WIN_WORKSPACE", PropertyType::Cardinal, &[3]);
        fake.add_window(A, (0, 0), (10, 10));
        fake.set_property(A, "_WIN_WORKSPACE", PropertyType::Cardinal, &[3]);
        let flags = skip_flags(&fake);
        let out = filter_clients(&fake, ClientList::new([A]), None, &flags).unwrap();
        assert_eq!(out.as_slice(), &[A]);
    }

    #[test]
    fn filter_fails_without_current_desktop() {
        let mut fake = FakeDesktop::new();
        fake.add_window(A, (0, 0), (10, 10));
        fake.set_window_desktop(A, 0);
        let err = filter_clients(&fake, ClientList::new([A]), None, &[]).unwrap_err();
        assert_eq!(err, PropertyError::unavailable("_WIN_WORKSPACE"));
    }

    #[test]
    fn skip_flag_found_anywhere_in_state() {
        let mut fake = FakeDesktop::new();
        fake.add_window(A, (0, 0), (10, 10));
        fake.add_window(B, (0, 0), (10, 10));
        fake.set_window_states(A, &["_NET_WM_STATE_ABOVE", STATE_SKIP_PAGER]);
        fake.set_window_states(B, &[STATE_SKIP_PAGER, "_NET_WM_STATE_ABOVE"]);
        let flags = skip_flags(&fake);
        assert!(has_any_state(&fake, A, &flags));
        assert!(has_any_state(&fake, B, &flags));
    }

    #[test]
    fn missing_state_means_no_flags() {
        let mut fake = FakeDesktop::new();
        fake.add_window(A, (0, 0), (10, 10));
        let flags = skip_flags(&fake);
        assert!(!has_any_state(&fake, A, &flags));
    }
}
