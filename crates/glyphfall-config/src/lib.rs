//! Settings file handling for glyphfall.
//!
//! Settings live in `config.toml` inside the platform config directory. The
//! file is optional and every field in it is optional; anything missing
//! falls back to the built-in defaults.

use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glyphfall_core::{RainParams, Theme, Tuning};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Theme installed at startup.
    pub theme: Theme,
    /// Milliseconds between ticks (also the pause poll period).
    pub tick_ms: u64,
    /// Spawning and trail parameters.
    pub rain: RainParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            tick_ms: 70,
            rain: RainParams::default(),
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing file, or a platform without a config directory, yields the
    /// defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot work with.
    ///
    /// Every numeric field is bounded so tick arithmetic cannot overflow and
    /// a single drop cannot outgrow any real terminal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rain = &self.rain;
        check("tick_ms", self.tick_ms, 1..=MAX_TICK_MS)?;
        check("rain.spawn_gap", rain.spawn_gap, 0..=MAX_ROWS)?;
        check("rain.min_trail", rain.min_trail, 1..=MAX_ROWS)?;
        check("rain.min_trail_cap", rain.min_trail_cap, 0..=MAX_ROWS)?;
        check("rain.exit_margin", rain.exit_margin, 0..=MAX_ROWS)?;
        check("rain.max_drops", rain.max_drops, 1..=MAX_DROPS)?;
        if !rain.trail_fraction.is_finite()
            || !(0.0..=MAX_TRAIL_FRACTION).contains(&rain.trail_fraction)
        {
            return Err(ConfigError::Invalid {
                field: "rain.trail_fraction",
                reason: "must be a number between 0 and 4",
            });
        }
        Ok(())
    }

    /// Starting values for the knobs the user can turn at runtime.
    pub fn tuning(&self) -> Tuning {
        Tuning::new(self.tick_ms, &self.rain)
    }
}

const MAX_TICK_MS: u64 = 60_000;
const MAX_ROWS: i32 = 10_000;
const MAX_DROPS: usize = 1_000_000;
const MAX_TRAIL_FRACTION: f32 = 4.0;

fn check<T>(field: &'static str, value: T, range: RangeInclusive<T>) -> Result<(), ConfigError>
where
    T: PartialOrd,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "out of range",
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "glyphfall")
}

/// Path of the settings file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Directory for log files, created if needed.
///
/// Uses the platform data directory and falls back to the temp directory.
pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let preferred = project_dirs().map(|dirs| dirs.data_local_dir().join("logs"));
    if let Some(dir) = preferred
        && fs::create_dir_all(&dir).is_ok()
    {
        return Ok(dir);
    }
    let dir = std::env::temp_dir().join("glyphfall").join("logs");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
