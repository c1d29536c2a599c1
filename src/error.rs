//! Error types.

use std::path::PathBuf;

/// Problems loading or validating a `GameConfig`.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid arena {width}x{height}: both sides must exceed {min}")]
    InvalidArena { width: f32, height: f32, min: f32 },

    #[error("spawn.{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

/// A broken state-consistency rule. These indicate simulation bugs, never
/// player-facing failures.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum InvariantViolation {
    #[error("player health {health} exceeds max {max}")]
    HealthAboveMax { health: i32, max: i32 },

    #[error("{count} boss entities alive at once")]
    MultipleBosses { count: usize },

    #[error("boss tracking says {tracked:?} but the field holds {found:?}")]
    BossTrackingMismatch { tracked: Option<u32>, found: Option<u32> },

    #[error("enemy {id} left in the field with health {health}")]
    DeadEnemyNotPruned { id: u32, health: i32 },

    #[error("expired particle left in the field")]
    ExpiredParticleNotPruned,
}
