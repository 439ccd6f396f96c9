//! X11-specific implementation.
//!
//! This module provides the concrete
//! [`WindowSystem`](crate::traits::WindowSystem) backend, talking to the X
//! server through `x11rb`.
//!
//! Nothing outside this module should reference X11 directly.

pub mod session;
