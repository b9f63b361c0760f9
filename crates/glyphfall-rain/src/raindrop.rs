//! A single falling drop.

use glyphfall_core::{ColorSlot, RainParams};
use rand::Rng;

use crate::chars::random_glyph;
use crate::surface::Surface;

/// One falling column segment: a white head followed by a fading trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Raindrop {
    /// Column the drop falls in.
    column: u16,
    /// Row of the head. Starts at 0 and only grows.
    row: i32,
    /// Number of trailing cells kept lit behind the head.
    trail_length: i32,
    /// Glyph currently shown at the head.
    glyph: char,
}

impl Raindrop {
    /// Create a drop at the top of `column` and paint its head.
    pub fn spawn<R, S>(
        column: u16,
        height_hint: f32,
        params: &RainParams,
        rng: &mut R,
        surface: &mut S,
    ) -> Self
    where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        let trail_length = rng.random_range(params.min_trail..=params.max_trail(height_hint));
        let glyph = random_glyph(rng);
        surface.put(column as i32, 0, glyph, ColorSlot::White);
        Self {
            column,
            row: 0,
            trail_length,
            glyph,
        }
    }

    /// Move the head down one row.
    ///
    /// The old head fades to a random shade, a fresh glyph becomes the new
    /// head, and the cell `trail_length` rows above it is erased.
    pub fn advance<R, S>(&mut self, rng: &mut R, surface: &mut S)
    where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        let height = surface.height() as i32;
        let col = self.column as i32;

        if self.row <= height {
            let shade = ColorSlot::SHADES[rng.random_range(0..ColorSlot::SHADES.len())];
            surface.put(col, self.row, self.glyph, shade);
        }

        self.row += 1;

        if self.row <= height {
            self.glyph = random_glyph(rng);
            surface.put(col, self.row, self.glyph, ColorSlot::White);
        }

        let tail = self.tail();
        if tail >= 0 {
            surface.erase(col, tail);
        }
    }

    /// Erase the whole trail window, head included.
    pub fn destroy<S: Surface + ?Sized>(self, surface: &mut S) {
        let col = self.column as i32;
        for row in self.tail()..=self.row {
            surface.erase(col, row);
        }
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn trail_length(&self) -> i32 {
        self.trail_length
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    /// Row of the oldest cell still inside the trail window.
    pub fn tail(&self) -> i32 {
        self.row - self.trail_length
    }
}
