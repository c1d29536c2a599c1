//! Discrete notifications the simulation emits for presentation layers.
//!
//! The simulation never touches audio or HUD state directly; it pushes
//! `GameEvent`s into an `EventSink` and a front-end decides what to do with
//! them. Dropping every event must not change the simulation.

/// Sound effects and music cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Shoot,
    Explosion,
    PowerUpCollected,
    BossSpawned,
    BossDefeated,
}

impl AudioCue {
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Shoot => "shoot",
            AudioCue::Explosion => "explosion",
            AudioCue::PowerUpCollected => "powerup-collected",
            AudioCue::BossSpawned => "boss-spawned",
            AudioCue::BossDefeated => "boss-defeated",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Buff {
    RapidFire,
    Shield,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudUpdate {
    /// Health is already clamped at zero.
    Stats { health: i32, score: u32 },
    BuffChanged { buff: Buff, active: bool },
    GameOver { final_score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Audio(AudioCue),
    Hud(HudUpdate),
}

/// Receiver for simulation events.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);

    fn audio(&mut self, cue: AudioCue) {
        self.emit(GameEvent::Audio(cue));
    }

    fn hud(&mut self, update: HudUpdate) {
        self.emit(GameEvent::Hud(update));
    }
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}
