//! [`WindowSystem`] implementation backed by an X11 connection.
//!
//! One [`X11Session`] wraps one `x11rb` connection to the display named by
//! `$DISPLAY` (or an explicit display string).  Every trait method is a
//! blocking round trip; nothing is cached.  The connection is closed when
//! the session is dropped.

use crate::clients::WindowHandle;
use crate::geometry::Frame;
use crate::property::{PropertyBuffer, PropertyError, PropertyType, MAX_PROPERTY_LEN};
use crate::traits::WindowSystem;
use log::{debug, info};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ClientMessageData, ClientMessageEvent, ConfigureWindowAux, ConnectionExt,
    EventMask, StackMode, Window, CLIENT_MESSAGE_EVENT,
};
use x11rb::rust_connection::RustConnection;

/// `_NET_ACTIVE_WINDOW` source indication for a normal application.
const SOURCE_APPLICATION: u32 = 1;

/// Errors that can occur when talking to the X server.
#[derive(Debug, thiserror::Error)]
#[error("X11 error: {0}")]
pub struct X11Error(String);

/// An open connection to an X display.
pub struct X11Session {
    conn: RustConnection,
    root: Window,
}

impl X11Session {
    /// Connect to `display`, or to `$DISPLAY` when `None`.
    pub fn connect(display: Option<&str>) -> Result<Self, X11Error> {
        let (conn, screen_num) = RustConnection::connect(display)
            .map_err(|e| X11Error(format!("cannot open display: {}", e)))?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| X11Error(format!("no screen {}", screen_num)))?;
        info!("connected to X11, screen {}, root window 0x{:x}", screen_num, root);
        Ok(Self { conn, root })
    }

    fn atom(&self, name: &str) -> Result<Atom, X11Error> {
        let reply = self
            .conn
            .intern_atom(false, name.as_bytes())
            .map_err(|e| X11Error(format!("intern {}: {}", name, e)))?
            .reply()
            .map_err(|e| X11Error(format!("intern {}: {}", name, e)))?;
        Ok(reply.atom)
    }

    fn flush(&self) -> Result<(), X11Error> {
        self.conn
            .flush()
            .map_err(|e| X11Error(format!("flush: {}", e)))
    }
}

impl PropertyType {
    fn x11_atom(self) -> Atom {
        match self {
            PropertyType::Window => AtomEnum::WINDOW.into(),
            PropertyType::Cardinal => AtomEnum::CARDINAL.into(),
            PropertyType::Atom => AtomEnum::ATOM.into(),
        }
    }
}

impl WindowSystem for X11Session {
    type Error = X11Error;

    fn root(&self) -> WindowHandle {
        WindowHandle(self.root)
    }

    fn get_property(
        &self,
        window: WindowHandle,
        expected: PropertyType,
        name: &str,
    ) -> Result<PropertyBuffer, PropertyError> {
        let property = self.atom(name).map_err(|e| {
            debug!("{}", e);
            PropertyError::unavailable(name)
        })?;
        let reply = self
            .conn
            .get_property(
                false,
                window.0,
                property,
                expected.x11_atom(),
                0,
                MAX_PROPERTY_LEN / 4,
            )
            .map_err(|e| X11Error(e.to_string()))
            .and_then(|cookie| cookie.reply().map_err(|e| X11Error(e.to_string())))
            .map_err(|e| {
                debug!("get_property {} on {}: {}", name, window, e);
                PropertyError::unavailable(name)
            })?;

        if reply.type_ == u32::from(AtomEnum::NONE) {
            return Err(PropertyError::unavailable(name));
        }
        if reply.type_ != expected.x11_atom() {
            return Err(PropertyError::type_mismatch(name, expected));
        }

        if reply.format == 32 {
            let units: Vec<u32> = reply.value32().into_iter().flatten().collect();
            Ok(PropertyBuffer::from_words(&units))
        } else {
            Ok(PropertyBuffer::from_bytes(reply.format, reply.value))
        }
    }

    fn intern_atom(&self, name: &str) -> Result<u32, X11Error> {
        self.atom(name)
    }

    fn geometry(&self, window: WindowHandle) -> Result<Frame, X11Error> {
        let geom = self
            .conn
            .get_geometry(window.0)
            .map_err(|e| X11Error(format!("get_geometry {}: {}", window, e)))?
            .reply()
            .map_err(|e| X11Error(format!("get_geometry {}: {}", window, e)))?;
        Ok(Frame {
            x: i32::from(geom.x),
            y: i32::from(geom.y),
            width: u32::from(geom.width),
            height: u32::from(geom.height),
        })
    }

    fn translate_to_root(
        &self,
        window: WindowHandle,
        x: i32,
        y: i32,
    ) -> Result<(i32, i32), X11Error> {
        let src_x = i16::try_from(x).map_err(|_| X11Error(format!("x {} out of range", x)))?;
        let src_y = i16::try_from(y).map_err(|_| X11Error(format!("y {} out of range", y)))?;
        let reply = self
            .conn
            .translate_coordinates(window.0, self.root, src_x, src_y)
            .map_err(|e| X11Error(format!("translate_coordinates {}: {}", window, e)))?
            .reply()
            .map_err(|e| X11Error(format!("translate_coordinates {}: {}", window, e)))?;
        Ok((i32::from(reply.dst_x), i32::from(reply.dst_y)))
    }

    fn request_activation(&self, window: WindowHandle) -> Result<(), X11Error> {
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window: window.0,
            type_: self.atom("_NET_ACTIVE_WINDOW")?,
            data: ClientMessageData::from([SOURCE_APPLICATION, x11rb::CURRENT_TIME, 0, 0, 0]),
        };
        self.conn
            .send_event(
                false,
                self.root,
                EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
                event,
            )
            .map_err(|e| X11Error(format!("send_event: {}", e)))?;
        self.flush()
    }

    fn map_raised(&self, window: WindowHandle) -> Result<(), X11Error> {
        self.conn
            .configure_window(window.0, &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE))
            .map_err(|e| X11Error(format!("raise {}: {}", window, e)))?;
        self.conn
            .map_window(window.0)
            .map_err(|e| X11Error(format!("map {}: {}", window, e)))?;
        self.flush()
    }
}
