//! The seam between winfocus and the windowing system.
//!
//! Every pipeline stage talks to the display through [`WindowSystem`], so the
//! enumeration, filtering and selection logic is not coupled to one protocol
//! binding.  The X11 backend lives in [`x11`](crate::x11); tests use an
//! in-memory double.

use crate::clients::WindowHandle;
use crate::geometry::Frame;
use crate::property::{PropertyBuffer, PropertyError, PropertyType};

/// A connection to a display that speaks the EWMH hint protocol.
///
/// Every method is one or two blocking request/response round trips.
/// Nothing is cached between calls.
pub trait WindowSystem {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// The root window of the default screen.
    fn root(&self) -> WindowHandle;

    /// Read property `name` from `window`, requiring type `expected`.
    ///
    /// Fails with [`PropertyError::Unavailable`] when the property is absent
    /// or the request fails, and with [`PropertyError::TypeMismatch`] when
    /// the stored type differs from `expected`.  At most
    /// [`MAX_PROPERTY_LEN`](crate::property::MAX_PROPERTY_LEN) bytes are
    /// read.
    fn get_property(
        &self,
        window: WindowHandle,
        expected: PropertyType,
        name: &str,
    ) -> Result<PropertyBuffer, PropertyError>;

    /// Resolve an atom name to its numeric identifier, creating it if needed.
    fn intern_atom(&self, name: &str) -> Result<u32, Self::Error>;

    /// Position and size of `window` as reported by the server.  The
    /// position may be relative to the window's parent.
    fn geometry(&self, window: WindowHandle) -> Result<Frame, Self::Error>;

    /// Translate the point `(x, y)` in `window`'s coordinate space into
    /// root-window coordinates.
    fn translate_to_root(
        &self,
        window: WindowHandle,
        x: i32,
        y: i32,
    ) -> Result<(i32, i32), Self::Error>;

    /// Ask the window manager to make `window` the active window, by sending
    /// a `_NET_ACTIVE_WINDOW` client message to the root window.
    fn request_activation(&self, window: WindowHandle) -> Result<(), Self::Error>;

    /// Map `window` and raise it above its siblings.
    fn map_raised(&self, window: WindowHandle) -> Result<(), Self::Error>;
}
