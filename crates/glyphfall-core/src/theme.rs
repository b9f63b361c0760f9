//! Color themes and the slot-indexed color registry.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Number of slots in the color registry.
pub const SLOT_COUNT: usize = 6;

/// A plain RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

/// Registry slot a cell is painted with.
///
/// Cells remember the slot rather than the color, so installing a new theme
/// recolors everything already on screen at the next redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorSlot {
    Highlight = 1,
    Bright = 2,
    Mid = 3,
    Dark = 4,
    /// Leading edge of a drop.
    White = 5,
    /// Erased cell.
    Black = 6,
}

impl ColorSlot {
    /// All slots in registry order.
    pub const ALL: [ColorSlot; SLOT_COUNT] = [
        ColorSlot::Highlight,
        ColorSlot::Bright,
        ColorSlot::Mid,
        ColorSlot::Dark,
        ColorSlot::White,
        ColorSlot::Black,
    ];

    /// Slots a decaying trail cell can take.
    pub const SHADES: [ColorSlot; 4] = [
        ColorSlot::Highlight,
        ColorSlot::Bright,
        ColorSlot::Mid,
        ColorSlot::Dark,
    ];

    fn index(self) -> usize {
        self as usize - 1
    }
}

/// Color theme for the rain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Theme {
    #[default]
    Green,
    Blue,
    Red,
    Yellow,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Green, Theme::Blue, Theme::Red, Theme::Yellow];

    /// The theme selected by a key, if any.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'g' => Some(Theme::Green),
            'b' => Some(Theme::Blue),
            'r' => Some(Theme::Red),
            'y' => Some(Theme::Yellow),
            _ => None,
        }
    }

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Self {
        Theme::ALL[(self.position() + 1) % Theme::ALL.len()]
    }

    /// The theme before this one, wrapping around.
    pub fn previous(self) -> Self {
        Theme::ALL[(self.position() + Theme::ALL.len() - 1) % Theme::ALL.len()]
    }

    fn position(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Green => "green",
            Theme::Blue => "blue",
            Theme::Red => "red",
            Theme::Yellow => "yellow",
        }
    }

    /// The six registry colors, in slot order.
    pub fn colors(self) -> [Rgb; SLOT_COUNT] {
        let [a, b, c, d] = self.shades();
        [a, b, c, d, Rgb::WHITE, Rgb::BLACK]
    }

    fn shades(self) -> [Rgb; 4] {
        match self {
            Theme::Green => [
                Rgb(34, 180, 85),
                Rgb(128, 206, 135),
                Rgb(56, 165, 49),
                Rgb(32, 72, 41),
            ],
            Theme::Blue => [
                Rgb(74, 184, 249),
                Rgb(9, 65, 152),
                Rgb(14, 35, 115),
                Rgb(9, 0, 136),
            ],
            Theme::Red => [
                Rgb(212, 0, 0),
                Rgb(240, 57, 57),
                Rgb(148, 0, 0),
                Rgb(92, 16, 16),
            ],
            Theme::Yellow => [
                Rgb(242, 226, 76),
                Rgb(189, 171, 8),
                Rgb(176, 161, 27),
                Rgb(150, 135, 0),
            ],
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a theme name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown theme `{}` (expected green, blue, red or yellow)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(theme) = Theme::ALL.into_iter().find(|t| t.name() == lower) {
            return Ok(theme);
        }
        let mut chars = lower.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Theme::from_key(key).ok_or(UnknownTheme(s.to_string())),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = UnknownTheme;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Slot-indexed color table consulted at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRegistry {
    theme: Theme,
    slots: [Color; SLOT_COUNT],
}

impl ColorRegistry {
    pub fn new(theme: Theme) -> Self {
        let mut registry = Self {
            theme,
            slots: [Color::Reset; SLOT_COUNT],
        };
        registry.install(theme);
        registry
    }

    /// Install a theme into slots 1..=6. Returns the number of slots written.
    pub fn install(&mut self, theme: Theme) -> usize {
        let colors = theme.colors();
        for (slot, rgb) in self.slots.iter_mut().zip(colors) {
            *slot = rgb.into();
        }
        self.theme = theme;
        colors.len()
    }

    pub fn color(&self, slot: ColorSlot) -> Color {
        self.slots[slot.index()]
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
