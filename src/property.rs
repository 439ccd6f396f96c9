//! Typed window properties.
//!
//! A property read goes through [`WindowSystem::get_property`], which hands
//! back an owned [`PropertyBuffer`].  Most of the EWMH properties this crate
//! reads are arrays of 32-bit protocol units (window ids, atoms, desktop
//! numbers), so the buffer always stores those units as a flat sequence of
//! 4-byte values, whatever word width the backend used to deliver them.
//!
//! Several hints exist under a modern `_NET_*` name and an older `_WIN_*`
//! alias.  Those chains are written down once as [`Lookup`] slices and
//! resolved with [`get_with_fallbacks`].

use crate::clients::WindowHandle;
use crate::traits::WindowSystem;
use log::debug;
use std::fmt;

/// Upper bound on the size of one property read, in bytes.
///
/// Requests are expressed in 32-bit units, so a single read asks for at most
/// `MAX_PROPERTY_LEN / 4` of them.
pub const MAX_PROPERTY_LEN: u32 = 4096;

/// The property types this crate asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Window,
    Cardinal,
    Atom,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Window => write!(f, "WINDOW"),
            PropertyType::Cardinal => write!(f, "CARDINAL"),
            PropertyType::Atom => write!(f, "ATOM"),
        }
    }
}

/// Why a property could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// The property is not set, or the round trip failed.
    #[error("cannot get {name} property")]
    Unavailable { name: String },
    /// The property exists but carries a different type.
    #[error("invalid type of {name} property (expected {expected})")]
    TypeMismatch { name: String, expected: PropertyType },
}

impl PropertyError {
    pub fn unavailable(name: &str) -> Self {
        PropertyError::Unavailable { name: name.into() }
    }

    pub fn type_mismatch(name: &str, expected: PropertyType) -> Self {
        PropertyError::TypeMismatch {
            name: name.into(),
            expected,
        }
    }
}

/// Owned bytes of one property value.
///
/// The buffer is sized exactly to the decoded value.  For format-32 data the
/// bytes are a packed sequence of native-endian `u32`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBuffer {
    format: u8,
    data: Vec<u8>,
}

impl PropertyBuffer {
    /// Wrap raw 8- or 16-bit property data.  Input beyond
    /// [`MAX_PROPERTY_LEN`] bytes is cut off.
    pub fn from_bytes(format: u8, mut data: Vec<u8>) -> Self {
        data.truncate(MAX_PROPERTY_LEN as usize);
        Self { format, data }
    }

    /// Repack 32-bit protocol units from whatever native word holds them.
    ///
    /// Client libraries commonly hand back format-32 data as an array of the
    /// platform `long`, which is 64 bits wide on LP64 hosts.  Only the low 32
    /// bits of each word carry the value, so each word is narrowed and the
    /// results are laid out contiguously.  At most `MAX_PROPERTY_LEN / 4`
    /// units are kept.
    pub fn from_words<W>(words: &[W]) -> Self
    where
        W: Copy + Into<u64>,
    {
        let max_units = (MAX_PROPERTY_LEN / 4) as usize;
        let data = words
            .iter()
            .take(max_units)
            .flat_map(|&w| (Into::<u64>::into(w) as u32).to_ne_bytes())
            .collect();
        Self { format: 32, data }
    }

    /// Iterate the value as 32-bit units.  Yields nothing unless the
    /// property is format 32.
    pub fn values32(&self) -> impl Iterator<Item = u32> + '_ {
        let data: &[u8] = if self.format == 32 { &self.data } else { &[] };
        data.chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
    }

    /// The first 32-bit unit, if any.
    pub fn first32(&self) -> Option<u32> {
        self.values32().next()
    }
}

/// One step of a fallback chain: a property name and the type it must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub name: &'static str,
    pub kind: PropertyType,
}

impl Lookup {
    pub const fn new(kind: PropertyType, name: &'static str) -> Self {
        Self { name, kind }
    }
}

/// `_NET_CLIENT_LIST`, then the GNOME 1.x `_WIN_CLIENT_LIST`.
pub const CLIENT_LIST: &[Lookup] = &[
    Lookup::new(PropertyType::Window, "_NET_CLIENT_LIST"),
    Lookup::new(PropertyType::Cardinal, "_WIN_CLIENT_LIST"),
];

pub const ACTIVE_WINDOW: &[Lookup] = &[Lookup::new(PropertyType::Window, "_NET_ACTIVE_WINDOW")];

pub const CURRENT_DESKTOP: &[Lookup] = &[
    Lookup::new(PropertyType::Cardinal, "_NET_CURRENT_DESKTOP"),
    Lookup::new(PropertyType::Cardinal, "_WIN_WORKSPACE"),
];

pub const WINDOW_DESKTOP: &[Lookup] = &[
    Lookup::new(PropertyType::Cardinal, "_NET_WM_DESKTOP"),
    Lookup::new(PropertyType::Cardinal, "_WIN_WORKSPACE"),
];

pub const WINDOW_STATE: &[Lookup] = &[Lookup::new(PropertyType::Atom, "_NET_WM_STATE")];

/// State flag for windows that pagers and switchers should not list.
pub const STATE_SKIP_PAGER: &str = "_NET_WM_STATE_SKIP_PAGER";

/// Read the first property in `chain` that `window` has with the right type.
///
/// Lookups are tried in order.  If every one fails, the error from the last
/// attempt is returned.
pub fn get_with_fallbacks<W>(
    ws: &W,
    window: WindowHandle,
    chain: &[Lookup],
) -> Result<PropertyBuffer, PropertyError>
where
    W: WindowSystem + ?Sized,
{
    let mut last = None;
    for lookup in chain {
        match ws.get_property(window, lookup.kind, lookup.name) {
            Ok(buf) => return Ok(buf),
            Err(e) => {
                debug!("{} on {}: {}", lookup.name, window, e);
                last = Some(e);
            }
        }
    }
    Err(last.unwrap_or_else(|| PropertyError::unavailable("<empty lookup chain>")))
}
