//! Knobs the user can turn while the rain is running.

use std::time::Duration;

use crate::params::RainParams;

/// Tick period bounds and step, in milliseconds.
pub const TICK_MS_MIN: u64 = 10;
pub const TICK_MS_MAX: u64 = 200;
pub const TICK_MS_STEP: u64 = 10;

/// Spawn odds bounds and step. Lower odds mean denser rain.
pub const SPAWN_ODDS_MIN: u32 = 20;
pub const SPAWN_ODDS_MAX: u32 = 200;
pub const SPAWN_ODDS_STEP: u32 = 5;

/// Trail fraction step. The fraction grows while below
/// [`TRAIL_FRACTION_GROW_BELOW`] and shrinks while above
/// [`TRAIL_FRACTION_SHRINK_ABOVE`].
pub const TRAIL_FRACTION_STEP: f32 = 0.05;
pub const TRAIL_FRACTION_GROW_BELOW: f32 = 1.01;
pub const TRAIL_FRACTION_SHRINK_ABOVE: f32 = 0.06;

/// Direction of a knob change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Up,
    Down,
}

/// Snapshot of the runtime knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Milliseconds between ticks.
    pub tick_ms: u64,
    /// See [`RainParams::spawn_odds`].
    pub spawn_odds: u32,
    /// See [`RainParams::trail_fraction`].
    pub trail_fraction: f32,
}

impl Tuning {
    pub fn new(tick_ms: u64, params: &RainParams) -> Self {
        Self {
            tick_ms,
            spawn_odds: params.spawn_odds,
            trail_fraction: params.trail_fraction,
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::new(70, &RainParams::default())
    }
}

/// Move the tick period one step. `Up` lengthens it (slower rain).
///
/// A step that would leave the bounds is not taken, so values set outside
/// them by the settings file can only move back towards them.
pub fn shift_tick_ms(tick_ms: u64, shift: Shift) -> u64 {
    match shift {
        Shift::Up if tick_ms + TICK_MS_STEP <= TICK_MS_MAX => tick_ms + TICK_MS_STEP,
        Shift::Down if tick_ms >= TICK_MS_MIN + TICK_MS_STEP => tick_ms - TICK_MS_STEP,
        _ => tick_ms,
    }
}

/// Move the spawn odds one step. `Up` makes the rain sparser.
pub fn shift_spawn_odds(odds: u32, shift: Shift) -> u32 {
    match shift {
        Shift::Up if odds.saturating_add(SPAWN_ODDS_STEP) <= SPAWN_ODDS_MAX => {
            odds + SPAWN_ODDS_STEP
        }
        Shift::Down if odds >= SPAWN_ODDS_MIN + SPAWN_ODDS_STEP => odds - SPAWN_ODDS_STEP,
        _ => odds,
    }
}

/// Move the trail fraction one step. `Up` gives longer trails.
pub fn shift_trail_fraction(fraction: f32, shift: Shift) -> f32 {
    match shift {
        Shift::Up if fraction < TRAIL_FRACTION_GROW_BELOW => fraction + TRAIL_FRACTION_STEP,
        Shift::Down if fraction > TRAIL_FRACTION_SHRINK_ABOVE => fraction - TRAIL_FRACTION_STEP,
        _ => fraction,
    }
}
