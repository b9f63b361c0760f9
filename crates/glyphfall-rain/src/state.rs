//! Rain simulation state: live drops plus the per-column throttle table.

use glyphfall_core::{RainParams, Tuning};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::raindrop::Raindrop;
use crate::surface::Surface;

/// Throttle value of a column that has never spawned a drop.
pub const NEVER: i32 = -10_000;

/// Counters kept over the life of a [`RainState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RainStats {
    /// Drops created.
    pub spawned: u64,
    /// Drops destroyed.
    pub retired: u64,
    /// Largest live drop count seen after a tick.
    pub peak_live: usize,
}

/// Rain simulation state.
#[derive(Debug)]
pub struct RainState {
    params: RainParams,
    /// Per-column throttle: tail row of the last drop spawned there, bumped
    /// once per tick for every live drop in the column. Grows, never shrinks.
    throttle: Vec<i32>,
    /// Live drops in creation order.
    drops: Vec<Raindrop>,
    rng: StdRng,
    stats: RainStats,
}

impl RainState {
    /// Create a state seeded from the operating system.
    pub fn new(params: RainParams) -> Self {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// Create a state with a fixed seed.
    pub fn with_seed(params: RainParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: RainParams, rng: StdRng) -> Self {
        Self {
            params,
            throttle: Vec::new(),
            drops: Vec::new(),
            rng,
            stats: RainStats::default(),
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Spawns new drops in eligible columns, then moves every live drop
    /// (newest first) and retires those whose tail has left the screen by
    /// the configured margin.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let width = surface.width() as usize;
        let lines = surface.height() as i32;

        if self.throttle.len() < width {
            self.throttle.resize(width, NEVER);
        }

        self.spawn_drops(lines, surface);

        let retire_after = self.params.retire_after(lines);
        for i in (0..self.drops.len()).rev() {
            let column = self.drops[i].column() as usize;
            if let Some(gap) = self.throttle.get_mut(column) {
                *gap += 1;
            }
            self.drops[i].advance(&mut self.rng, surface);
            if self.drops[i].tail() > retire_after {
                self.drops.remove(i).destroy(surface);
                self.stats.retired += 1;
            }
        }

        self.stats.peak_live = self.stats.peak_live.max(self.drops.len());
    }

    fn spawn_drops<S: Surface + ?Sized>(&mut self, lines: i32, surface: &mut S) {
        let height_hint = lines as f32 / 2.0;
        for column in 0..self.throttle.len() {
            let gap = self.throttle[column];
            let eligible = gap > self.params.spawn_gap || gap == NEVER;
            if !eligible || self.rng.random_range(0..=self.params.spawn_odds) != 0 {
                continue;
            }
            let Ok(col) = u16::try_from(column) else {
                break;
            };
            let drop = Raindrop::spawn(col, height_hint, &self.params, &mut self.rng, surface);
            self.throttle[column] = drop.tail();
            self.drops.push(drop);
            self.stats.spawned += 1;
        }
    }

    /// Take over the spawn odds and trail fraction from `tuning`.
    ///
    /// Live drops keep the trail they were spawned with.
    pub fn retune(&mut self, tuning: &Tuning) {
        self.params.spawn_odds = tuning.spawn_odds;
        self.params.trail_fraction = tuning.trail_fraction;
    }

    /// Destroy every live drop, erasing their trails.
    pub fn retire_all<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for drop in self.drops.drain(..).rev() {
            drop.destroy(surface);
            self.stats.retired += 1;
        }
    }

    /// True once the live drop count has passed the safety limit.
    pub fn overflowed(&self) -> bool {
        self.drops.len() > self.params.max_drops
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn throttle(&self) -> &[i32] {
        &self.throttle
    }

    pub fn params(&self) -> &RainParams {
        &self.params
    }

    pub fn stats(&self) -> RainStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Grid;

    /// Params where every eligible column spawns on every tick.
    fn eager() -> RainParams {
        RainParams {
            spawn_odds: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_throttle_grows_and_never_shrinks() {
        let mut rain = RainState::with_seed(RainParams::default(), 1);
        let mut grid = Grid::new(10, 20);
        rain.tick(&mut grid);
        assert_eq!(rain.throttle().len(), 10);

        grid.resize(25, 20);
        rain.tick(&mut grid);
        assert_eq!(rain.throttle().len(), 25);

        grid.resize(5, 20);
        rain.tick(&mut grid);
        assert_eq!(rain.throttle().len(), 25);
    }

    #[test]
    fn test_new_columns_get_sentinel() {
        let mut rain = RainState::with_seed(
            RainParams {
                spawn_odds: u32::MAX,
                ..Default::default()
            },
            2,
        );
        let mut grid = Grid::new(4, 10);
        rain.tick(&mut grid);
        assert!(rain.throttle().iter().all(|gap| *gap == NEVER));
    }

    #[test]
    fn test_eager_spawn_fills_every_column() {
        let mut rain = RainState::with_seed(eager(), 3);
        let mut grid = Grid::new(6, 20);
        rain.tick(&mut grid);

        assert_eq!(rain.len(), 6);
        assert_eq!(rain.stats().spawned, 6);
        for drop in rain.drops() {
            assert_eq!(drop.row(), 1);
            let gap = rain.throttle()[drop.column() as usize];
            assert_eq!(gap, -drop.trail_length() + 1);
        }
    }

    #[test]
    fn test_column_waits_for_spawn_gap() {
        let mut rain = RainState::with_seed(eager(), 4);
        let mut grid = Grid::new(1, 20);
        rain.tick(&mut grid);
        assert_eq!(rain.stats().spawned, 1);

        let trail = rain.drops()[0].trail_length();
        // The throttle climbs by one per tick from `1 - trail` and must
        // exceed the gap before the column is eligible again.
        let quiet_ticks = (rain.params().spawn_gap + trail) as usize;
        for _ in 0..quiet_ticks {
            rain.tick(&mut grid);
            assert_eq!(rain.stats().spawned, 1);
        }
        rain.tick(&mut grid);
        assert_eq!(rain.stats().spawned, 2);
    }

    #[test]
    fn test_drops_retire_past_margin() {
        let mut rain = RainState::with_seed(eager(), 5);
        let mut grid = Grid::new(3, 8);
        let retire_after = rain.params().retire_after(8);
        for _ in 0..200 {
            rain.tick(&mut grid);
            assert!(rain.drops().iter().all(|d| d.tail() <= retire_after));
        }
        assert!(rain.stats().retired > 0);
        assert_eq!(
            rain.stats().spawned - rain.stats().retired,
            rain.len() as u64
        );
    }

    #[test]
    fn test_retire_all_blanks_surface() {
        let mut rain = RainState::with_seed(eager(), 6);
        let mut grid = Grid::new(12, 16);
        for _ in 0..9 {
            rain.tick(&mut grid);
        }
        assert!(!grid.is_blank());
        rain.retire_all(&mut grid);
        assert!(rain.is_empty());
        assert!(grid.is_blank());
    }

    #[test]
    fn test_overflow_detection() {
        let mut rain = RainState::with_seed(
            RainParams {
                max_drops: 3,
                ..eager()
            },
            7,
        );
        let mut grid = Grid::new(3, 10);
        rain.tick(&mut grid);
        assert!(!rain.overflowed());

        grid.resize(8, 10);
        rain.tick(&mut grid);
        assert!(rain.overflowed());
    }

    #[test]
    fn test_spawned_drops_in_hidden_columns_are_harmless() {
        let mut rain = RainState::with_seed(eager(), 8);
        let mut grid = Grid::new(20, 10);
        rain.tick(&mut grid);
        grid.resize(2, 10);
        for _ in 0..50 {
            rain.tick(&mut grid);
        }
        assert_eq!(rain.throttle().len(), 20);
        assert!(rain.drops().iter().any(|d| d.column() >= 2));
    }

    #[test]
    fn test_peak_live_tracks_maximum() {
        let mut rain = RainState::with_seed(eager(), 9);
        let mut grid = Grid::new(5, 10);
        rain.tick(&mut grid);
        let peak = rain.stats().peak_live;
        assert_eq!(peak, 5);
        rain.retire_all(&mut grid);
        assert_eq!(rain.stats().peak_live, 5);
    }

    #[test]
    fn test_retune_changes_spawning_and_trails() {
        let mut rain = RainState::with_seed(
            RainParams {
                spawn_odds: u32::MAX,
                ..Default::default()
            },
            10,
        );
        let mut grid = Grid::new(6, 40);
        rain.retune(&Tuning {
            tick_ms: 70,
            spawn_odds: 0,
            trail_fraction: 0.0,
        });
        rain.tick(&mut grid);

        assert_eq!(rain.len(), 6);
        assert_eq!(rain.params().spawn_odds, 0);
        let cap = rain.params().max_trail(20.0);
        assert_eq!(cap, rain.params().min_trail_cap);
        assert!(rain.drops().iter().all(|d| d.trail_length() <= cap));
    }
}
