//! Tunable rain parameters.

use serde::{Deserialize, Serialize};

/// Knobs for drop spawning, trail length and retirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainParams {
    /// Throttle value a column must exceed before it spawns again.
    pub spawn_gap: i32,
    /// A column spawns when a uniform draw over `0..=spawn_odds` hits 0.
    pub spawn_odds: u32,
    /// Shortest possible trail.
    pub min_trail: i32,
    /// Floor for the upper bound of the trail length.
    pub min_trail_cap: i32,
    /// Fraction of the height hint used as the trail length upper bound.
    pub trail_fraction: f32,
    /// Rows a tail travels below the screen before the drop is retired.
    pub exit_margin: i32,
    /// Live drop count above which the safety valve fires.
    pub max_drops: usize,
}

impl RainParams {
    /// Inclusive upper bound for a trail spawned with `height_hint`.
    pub fn max_trail(&self, height_hint: f32) -> i32 {
        let scaled = (height_hint * self.trail_fraction) as i32;
        scaled.max(self.min_trail_cap).max(self.min_trail)
    }

    /// Tail row past which a drop is retired on a screen `lines` tall.
    pub fn retire_after(&self, lines: i32) -> i32 {
        lines
            .saturating_add(self.exit_margin)
            .saturating_add(self.spawn_gap)
    }
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            spawn_gap: 15,
            spawn_odds: 100,
            min_trail: 4,
            min_trail_cap: 6,
            trail_fraction: 0.6,
            exit_margin: 10,
            max_drops: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_trail() {
        let params = RainParams::default();
        assert_eq!(params.max_trail(10.0), 6);
        assert_eq!(params.max_trail(0.0), 6);
        assert_eq!(params.max_trail(20.0), 12);
        assert_eq!(params.max_trail(13.5), 8);
    }

    #[test]
    fn test_max_trail_never_below_min() {
        let params = RainParams {
            min_trail_cap: 2,
            ..Default::default()
        };
        assert_eq!(params.max_trail(1.0), 4);
    }

    #[test]
    fn test_retire_after() {
        assert_eq!(RainParams::default().retire_after(20), 45);
    }

    #[test]
    fn test_retire_after_saturates() {
        let params = RainParams {
            spawn_gap: i32::MAX,
            ..Default::default()
        };
        assert_eq!(params.retire_after(20), i32::MAX);

        let params = RainParams {
            exit_margin: i32::MAX,
            spawn_gap: i32::MAX,
            ..Default::default()
        };
        assert_eq!(params.retire_after(i32::MAX), i32::MAX);
    }
}
