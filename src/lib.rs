//! Simulation core for a top-down arena shooter.
//!
//! The library owns the game loop: entity updates, spawning, collisions,
//! scoring and the start/restart state machine. Input, rendering, HUD and
//! audio are supplied by the caller through `input`, `render` and `events`.

pub mod combat;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod player;
pub mod render;
pub mod session;
pub mod spawner;

pub use config::GameConfig;
pub use error::{ConfigError, InvariantViolation};
pub use events::{AudioCue, Buff, EventSink, GameEvent, HudUpdate};
pub use input::{InputSnapshot, InputSource};
pub use session::{Schedule, Session};
