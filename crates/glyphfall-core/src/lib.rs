//! Core types for the glyphfall digital rain.
//!
//! This crate holds the pieces shared between the simulation and the
//! binary: the color themes and their registry slots, the tunable rain
//! parameters, the knobs the user can turn at runtime, and the control state
//! the input listener uses to steer the display loop.

mod control;
mod params;
mod theme;
pub mod tuning;

pub use control::{Command, ControlState};
pub use params::RainParams;
pub use theme::{ColorRegistry, ColorSlot, Rgb, SLOT_COUNT, Theme, UnknownTheme};
pub use tuning::{Shift, Tuning};
