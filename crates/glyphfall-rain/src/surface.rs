//! Drawing surface for the rain.
//!
//! Drops paint into a [`Surface`]. The display loop uses a [`Grid`], a
//! persistent cell buffer that keeps its contents between frames the way a
//! curses screen does, and renders it through a [`GridView`] each tick.

use glyphfall_core::{ColorRegistry, ColorSlot};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// A character cell painted with a registry slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub slot: ColorSlot,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        slot: ColorSlot::Black,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Something drops can paint on.
///
/// Writes outside the current extents, including negative coordinates, must
/// be ignored: the terminal can shrink between a size check and a write.
pub trait Surface {
    /// Current width in columns.
    fn width(&self) -> u16;

    /// Current height in lines.
    fn height(&self) -> u16;

    /// Paint `glyph` at `(col, row)` with the color in `slot`.
    fn put(&mut self, col: i32, row: i32, glyph: char, slot: ColorSlot);

    /// Paint the background over `(col, row)`.
    fn erase(&mut self, col: i32, row: i32) {
        self.put(col, row, Cell::BLANK.glyph, Cell::BLANK.slot);
    }
}

/// Persistent cell buffer sized to the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    /// Change the extents, keeping whatever overlaps the old ones.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        let mut resized = Grid::new(width, height);
        for row in 0..self.height.min(height) {
            for col in 0..self.width.min(width) {
                if let Some(cell) = self.get(col, row) {
                    let idx = resized.index(col, row);
                    resized.cells[idx] = cell;
                }
            }
        }
        *self = resized;
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(self.index(col, row)).copied()
    }

    /// True if no cell shows a glyph.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.glyph == ' ')
    }

    /// Pair the grid with a registry so it can be drawn.
    pub fn view<'a>(&'a self, registry: &'a ColorRegistry) -> GridView<'a> {
        GridView {
            grid: self,
            registry,
        }
    }

    fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

impl Surface for Grid {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn put(&mut self, col: i32, row: i32, glyph: char, slot: ColorSlot) {
        let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = self.index(col, row);
        self.cells[idx] = Cell { glyph, slot };
    }
}

/// Widget rendering a [`Grid`] with the colors of a [`ColorRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a Grid,
    registry: &'a ColorRegistry,
}

impl Widget for GridView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = self.registry.color(ColorSlot::Black);
        for row in 0..area.height {
            for col in 0..area.width {
                let cell = self.grid.get(col, row).unwrap_or_default();
                let fg = match cell.slot {
                    ColorSlot::Black => Color::Reset,
                    slot => self.registry.color(slot),
                };
                if let Some(out) = buf.cell_mut((area.x + col, area.y + row)) {
                    out.set_char(cell.glyph).set_fg(fg).set_bg(background);
                }
            }
        }
    }
}
