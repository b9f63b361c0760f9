//! The display loop.

use std::sync::Arc;
use std::thread;

use glyphfall_config::Settings;
use glyphfall_core::ControlState;
use glyphfall_rain::{Grid, RainState, RainStats};
use ratatui::{DefaultTerminal, Frame, layout::Size};

use crate::help;

/// What one pass through the loop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The simulation moved one tick.
    Advanced,
    /// Paused: nothing moved.
    Paused,
    /// The exit flag is set.
    Exit,
    /// Too many live drops; the safety valve fired.
    Overflow,
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Quit,
    Overflow,
}

/// The main application: owns the rain and the surface it paints on.
///
/// The tick period, also used as the pause poll period, lives in the shared
/// control state so the listener can change it.
#[derive(Debug)]
pub struct App {
    /// Flags, knobs and colors shared with the input listener.
    control: Arc<ControlState>,
    /// Live drops and throttle table.
    rain: RainState,
    /// Persistent cell buffer drawn every tick.
    grid: Grid,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: &Settings, control: Arc<ControlState>) -> Self {
        Self::with_rain(RainState::new(settings.rain), control)
    }

    pub fn with_rain(rain: RainState, control: Arc<ControlState>) -> Self {
        Self {
            control,
            rain,
            grid: Grid::new(0, 0),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<Shutdown> {
        terminal.hide_cursor()?;
        terminal.clear()?;

        loop {
            match self.step(terminal.size()?) {
                Step::Exit => break,
                Step::Overflow => {
                    tracing::warn!(
                        live = self.rain.len(),
                        limit = self.rain.params().max_drops,
                        "too many drops, stopping"
                    );
                    return Ok(Shutdown::Overflow);
                }
                Step::Paused => {
                    terminal.draw(|frame| self.render(frame))?;
                    thread::sleep(self.control.tick());
                }
                Step::Advanced => {
                    thread::sleep(self.control.tick());
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        let stats = self.finish();
        terminal.show_cursor()?;
        terminal.clear()?;
        terminal.draw(|frame| self.render(frame))?;
        tracing::info!(
            spawned = stats.spawned,
            retired = stats.retired,
            peak_live = stats.peak_live,
            "rain stopped"
        );
        Ok(Shutdown::Quit)
    }

    /// One pass through the loop, without sleeping or drawing.
    pub fn step(&mut self, size: Size) -> Step {
        if self.control.should_exit() {
            return Step::Exit;
        }
        if self.rain.overflowed() {
            return Step::Overflow;
        }
        if self.control.is_paused() {
            return Step::Paused;
        }
        self.rain.retune(&self.control.tuning());
        self.grid.resize(size.width, size.height);
        self.rain.tick(&mut self.grid);
        Step::Advanced
    }

    /// Draw the grid with the current theme, and the key reference on top
    /// of it when toggled on.
    pub fn render(&self, frame: &mut Frame) {
        let registry = self.control.registry();
        frame.render_widget(self.grid.view(&registry), frame.area());
        if self.control.help_shown() {
            help::render_help(frame, &registry);
        }
    }

    /// Erase every live drop and blank the grid.
    fn finish(&mut self) -> RainStats {
        self.rain.retire_all(&mut self.grid);
        self.grid.clear();
        self.rain.stats()
    }
}
