//! Digital rain simulation for glyphfall.
//!
//! Drops fall down terminal columns, painting a white head and a trail that
//! decays through the shade slots of the active theme. Everything here draws
//! onto a [`Surface`]; the binary owns the terminal and renders the [`Grid`]
//! with [`GridView`] once per tick.

mod chars;
mod raindrop;
mod state;
mod surface;

pub use chars::{GLYPHS, random_glyph};
pub use raindrop::Raindrop;
pub use state::{NEVER, RainState, RainStats};
pub use surface::{Cell, Grid, GridView, Surface};
