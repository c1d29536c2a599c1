//! Session configuration, loadable from TOML.
//!
//! ```toml
//! seed = 42
//!
//! [arena]
//! width = 480
//! height = 360
//!
//! [spawn]
//! enemy_interval = 50
//! powerup_interval = 250
//! boss_score = 500
//! boss_rearm_interval = 1000   # 0 = one boss per session
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub spawn: SpawnConfig,
    /// Fixed RNG seed; drawn from entropy when absent.
    pub seed: Option<u64>,
}

/// Arena size, fixed for the session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Frames between enemy spawns.
    pub enemy_interval: u32,
    /// Frames between power-up rolls.
    pub powerup_interval: u32,
    /// Score at which the first boss appears.
    pub boss_score: u32,
    /// Score added to the boss milestone after each boss spawn.
    pub boss_rearm_interval: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            arena: ArenaConfig::default(),
            spawn: SpawnConfig::default(),
            seed: None,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            enemy_interval: ENEMY_SPAWN_INTERVAL,
            powerup_interval: POWERUP_SPAWN_INTERVAL,
            boss_score: BOSS_SCORE_THRESHOLD,
            boss_rearm_interval: BOSS_REARM_INTERVAL,
        }
    }
}

impl GameConfig {
    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // The player must fit with its whole collision circle inside.
        let min = PLAYER_RADIUS * 2.0;
        let ArenaConfig { width, height } = self.arena;
        if !(width.is_finite() && height.is_finite()) || width <= min || height <= min {
            return Err(ConfigError::InvalidArena { width, height, min });
        }
        if self.spawn.enemy_interval == 0 {
            return Err(ConfigError::ZeroInterval("enemy_interval"));
        }
        if self.spawn.powerup_interval == 0 {
            return Err(ConfigError::ZeroInterval("powerup_interval"));
        }
        Ok(())
    }
}
