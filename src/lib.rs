//! **winfocus** — move keyboard focus to the nearest window in a direction.
//!
//! Meant to be bound to keys: each invocation reads the window list from the
//! window manager through the EWMH hints, keeps the windows on the current
//! desktop, picks the nearest one above, below, left or right of the active
//! window, asks the window manager to activate it, and exits.
//!
//! # Architecture
//!
//! The pipeline only talks to the display through
//! [`traits::WindowSystem`], so enumeration ([`clients`]), geometry
//! ([`geometry`]) and selection ([`selector`]) are not coupled to a specific
//! protocol binding.  [`focus::FocusNavigator`] strings the stages together.
//!
//! The concrete implementation lives in [`x11`] (an X11 connection via
//! `x11rb`).

pub mod clients;
pub mod command;
pub mod config;
pub mod focus;
pub mod geometry;
pub mod property;
pub mod selector;
pub mod traits;
pub mod x11;

#[cfg(test)]
mod testing;
