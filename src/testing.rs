//! In-memory [`WindowSystem`] used by the unit tests.

use crate::clients::WindowHandle;
use crate::geometry::Frame;
use crate::property::{PropertyBuffer, PropertyError, PropertyType};
use crate::traits::WindowSystem;
use std::cell::RefCell;
use std::collections::HashMap;

const ROOT: WindowHandle = WindowHandle(0x1);

#[derive(Debug, thiserror::Error)]
#[error("fake desktop: {0}")]
pub struct FakeError(String);

/// A desktop whose windows and properties are set up by the test.
///
/// Format-32 properties are stored as 64-bit words, the way a 64-bit Xlib
/// hands them out, so every read goes through the repacking path.
#[derive(Debug, Default)]
pub struct FakeDesktop {
    properties: HashMap<(WindowHandle, String), (PropertyType, Vec<u64>)>,
    /// Window origin in root coordinates and size.
    windows: HashMap<WindowHandle, ((i32, i32), (u32, u32))>,
    /// Origin of the frame a window was reparented into, in root
    /// coordinates.  Top-level windows have none.
    frames: HashMap<WindowHandle, (i32, i32)>,
    atoms: RefCell<HashMap<String, u32>>,
    activations: RefCell<Vec<WindowHandle>>,
    raised: RefCell<Vec<WindowHandle>>,
    property_reads: RefCell<usize>,
    fail_activation: bool,
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_handle(&self) -> WindowHandle {
        ROOT
    }

    pub fn set_property(
        &mut self,
        window: WindowHandle,
        name: &str,
        kind: PropertyType,
        units: &[u32],
    ) {
        let words = units.iter().map(|&u| u64::from(u)).collect();
        self.properties.insert((window, name.to_string()), (kind, words));
    }

    pub fn set_root_property(&mut self, name: &str, kind: PropertyType, units: &[u32]) {
        self.set_property(ROOT, name, kind, units);
    }

    pub fn set_current_desktop(&mut self, desktop: u32) {
        self.set_root_property("_NET_CURRENT_DESKTOP", PropertyType::Cardinal, &[desktop]);
    }

    pub fn set_client_list(&mut self, windows: &[WindowHandle]) {
        let ids: Vec<u32> = windows.iter().map(|w| w.0).collect();
        self.set_root_property("_NET_CLIENT_LIST", PropertyType::Window, &ids);
    }

    pub fn set_active(&mut self, window: WindowHandle) {
        self.set_root_property("_NET_ACTIVE_WINDOW", PropertyType::Window, &[window.0]);
    }

    /// Register a window whose top-left corner is at `origin` (root
    /// coordinates).
    pub fn add_window(&mut self, window: WindowHandle, origin: (i32, i32), size: (u32, u32)) {
        self.windows.insert(window, (origin, size));
    }

    /// Put `window` inside a frame whose top-left corner is at
    /// `frame_origin`.  Its geometry is then reported relative to the frame.
    pub fn reparent(&mut self, window: WindowHandle, frame_origin: (i32, i32)) {
        self.frames.insert(window, frame_origin);
    }

    pub fn set_window_desktop(&mut self, window: WindowHandle, desktop: u32) {
        self.set_property(window, "_NET_WM_DESKTOP", PropertyType::Cardinal, &[desktop]);
    }

    pub fn set_window_states(&mut self, window: WindowHandle, states: &[&str]) {
        let atoms: Vec<u32> = states.iter().map(|s| self.atom(s)).collect();
        self.set_property(window, "_NET_WM_STATE", PropertyType::Atom, &atoms);
    }

    /// Make [`request_activation`](WindowSystem::request_activation) fail.
    pub fn fail_activation(&mut self) {
        self.fail_activation = true;
    }

    pub fn activations(&self) -> Vec<WindowHandle> {
        self.activations.borrow().clone()
    }

    pub fn raised(&self) -> Vec<WindowHandle> {
        self.raised.borrow().clone()
    }

    pub fn property_reads(&self) -> usize {
        *self.property_reads.borrow()
    }

    fn atom(&self, name: &str) -> u32 {
        let mut atoms = self.atoms.borrow_mut();
        let next = 0x100 + atoms.len() as u32;
        *atoms.entry(name.to_string()).or_insert(next)
    }
}

impl WindowSystem for FakeDesktop {
    type Error = FakeError;

    fn root(&self) -> WindowHandle {
        ROOT
    }

    fn get_property(
        &self,
        window: WindowHandle,
        expected: PropertyType,
        name: &str,
    ) -> Result<PropertyBuffer, PropertyError> {
        *self.property_reads.borrow_mut() += 1;
        match self.properties.get(&(window, name.to_string())) {
            None => Err(PropertyError::unavailable(name)),
            Some((kind, _)) if *kind != expected => {
                Err(PropertyError::type_mismatch(name, expected))
            }
            Some((_, words)) => Ok(PropertyBuffer::from_words(words)),
        }
    }

    fn intern_atom(&self, name: &str) -> Result<u32, FakeError> {
        Ok(self.atom(name))
    }

    fn geometry(&self, window: WindowHandle) -> Result<Frame, FakeError> {
        let ((ox, oy), (width, height)) = self
            .windows
            .get(&window)
            .ok_or_else(|| FakeError(format!("bad window {}", window)))?;
        let (px, py) = self.frames.get(&window).copied().unwrap_or((0, 0));
        Ok(Frame {
            x: ox - px,
            y: oy - py,
            width: *width,
            height: *height,
        })
    }

    fn translate_to_root(
        &self,
        window: WindowHandle,
        x: i32,
        y: i32,
    ) -> Result<(i32, i32), FakeError> {
        let ((ox, oy), _) = self
            .windows
            .get(&window)
            .ok_or_else(|| FakeError(format!("bad window {}", window)))?;
        Ok((ox + x, oy + y))
    }

    fn request_activation(&self, window: WindowHandle) -> Result<(), FakeError> {
        if self.fail_activation {
            return Err(FakeError("send_event failed".into()));
        }
        self.activations.borrow_mut().push(window);
        Ok(())
    }

    fn map_raised(&self, window: WindowHandle) -> Result<(), FakeError> {
        self.raised.borrow_mut().push(window);
        Ok(())
    }
}
