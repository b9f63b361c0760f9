//! Control state shared between the input listener and the display loop.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use std::time::Duration;

use crate::theme::{ColorRegistry, Theme};
use crate::tuning::{self, Shift, Tuning};

/// A user command decoded from one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTheme(Theme),
    /// Step through the themes in either direction.
    CycleTheme(Shift),
    TogglePause,
    /// `Up` slows the rain down.
    Speed(Shift),
    /// `Up` makes the rain sparser.
    Density(Shift),
    /// `Up` allows longer trails.
    TrailLength(Shift),
    ToggleHelp,
    Quit,
}

impl Command {
    /// Decode a command from a single key.
    pub fn from_key(key: char) -> Option<Self> {
        if let Some(theme) = Theme::from_key(key) {
            return Some(Command::SetTheme(theme));
        }
        match key.to_ascii_lowercase() {
            ' ' | 'p' => Some(Command::TogglePause),
            'e' | 'q' => Some(Command::Quit),
            'm' => Some(Command::ToggleHelp),
            '+' => Some(Command::Speed(Shift::Down)),
            '-' => Some(Command::Speed(Shift::Up)),
            '>' => Some(Command::CycleTheme(Shift::Up)),
            '<' => Some(Command::CycleTheme(Shift::Down)),
            'w' => Some(Command::Density(Shift::Down)),
            's' => Some(Command::Density(Shift::Up)),
            'd' => Some(Command::TrailLength(Shift::Up)),
            'a' => Some(Command::TrailLength(Shift::Down)),
            _ => None,
        }
    }

    /// Decode a command from the first character of a line.
    pub fn from_line(line: &str) -> Option<Self> {
        line.chars().next().and_then(Self::from_key)
    }
}

/// Flags, knobs and color registry shared by the two threads.
///
/// Everything but the registry is polled once per tick, so relaxed atomics
/// are enough. The registry sits behind a lock because the listener installs
/// themes while the display loop may be drawing.
#[derive(Debug)]
pub struct ControlState {
    paused: AtomicBool,
    exit: AtomicBool,
    help: AtomicBool,
    tick_ms: AtomicU64,
    spawn_odds: AtomicU32,
    /// `f32` bit pattern.
    trail_fraction: AtomicU32,
    registry: RwLock<ColorRegistry>,
}

impl ControlState {
    pub fn new(theme: Theme) -> Self {
        Self::with_tuning(theme, Tuning::default())
    }

    pub fn with_tuning(theme: Theme, tuning: Tuning) -> Self {
        Self {
            paused: AtomicBool::new(false),
            exit: AtomicBool::new(false),
            help: AtomicBool::new(false),
            tick_ms: AtomicU64::new(tuning.tick_ms),
            spawn_odds: AtomicU32::new(tuning.spawn_odds),
            trail_fraction: AtomicU32::new(tuning.trail_fraction.to_bits()),
            registry: RwLock::new(ColorRegistry::new(theme)),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Flip the pause flag, returning the new value.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn help_shown(&self) -> bool {
        self.help.load(Ordering::Relaxed)
    }

    /// Flip the help overlay flag, returning the new value.
    pub fn toggle_help(&self) -> bool {
        !self.help.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn should_exit(&self) -> bool {
        self.exit.load(Ordering::Relaxed)
    }

    /// Unpause and raise the exit flag.
    pub fn request_exit(&self) {
        self.paused.store(false, Ordering::Relaxed);
        self.exit.store(true, Ordering::Relaxed);
    }

    /// Install a theme into the shared registry. Returns the slots written.
    pub fn apply_theme(&self, theme: Theme) -> usize {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .install(theme)
    }

    /// Install the theme next to the active one. Returns the new theme.
    pub fn cycle_theme(&self, shift: Shift) -> Theme {
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        let theme = match shift {
            Shift::Up => registry.theme().next(),
            Shift::Down => registry.theme().previous(),
        };
        registry.install(theme);
        theme
    }

    pub fn active_theme(&self) -> Theme {
        self.registry().theme()
    }

    /// Read access to the registry, held for the duration of a draw.
    pub fn registry(&self) -> RwLockReadGuard<'_, ColorRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current values of the runtime knobs.
    pub fn tuning(&self) -> Tuning {
        Tuning {
            tick_ms: self.tick_ms.load(Ordering::Relaxed),
            spawn_odds: self.spawn_odds.load(Ordering::Relaxed),
            trail_fraction: f32::from_bits(self.trail_fraction.load(Ordering::Relaxed)),
        }
    }

    pub fn tick(&self) -> Duration {
        self.tuning().tick()
    }

    fn shift_speed(&self, shift: Shift) {
        // The closure always returns Some, so the update cannot fail.
        let _ = self
            .tick_ms
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |ms| {
                Some(tuning::shift_tick_ms(ms, shift))
            });
    }

    fn shift_density(&self, shift: Shift) {
        let _ = self
            .spawn_odds
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |odds| {
                Some(tuning::shift_spawn_odds(odds, shift))
            });
    }

    fn shift_trail_length(&self, shift: Shift) {
        let _ = self
            .trail_fraction
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some(tuning::shift_trail_fraction(f32::from_bits(bits), shift).to_bits())
            });
    }

    /// Apply a decoded command.
    pub fn apply(&self, command: Command) {
        match command {
            Command::SetTheme(theme) => {
                self.apply_theme(theme);
            }
            Command::CycleTheme(shift) => {
                self.cycle_theme(shift);
            }
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::Speed(shift) => self.shift_speed(shift),
            Command::Density(shift) => self.shift_density(shift),
            Command::TrailLength(shift) => self.shift_trail_length(shift),
            Command::ToggleHelp => {
                self.toggle_help();
            }
            Command::Quit => self.request_exit(),
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
