//! Game-loop orchestrator and lifecycle state machine.
//!
//! `Idle → Running → GameOver → Running`. The session owns the simulation
//! state and its RNG; an external scheduler calls `frame` once per display
//! frame and keeps doing so only while it answers `Schedule::Next`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compute::{init_state, reset_state, tick, TickOutcome};
use crate::config::GameConfig;
use crate::entities::{GameStatus, SimulationState};
use crate::events::{Buff, EventSink, HudUpdate};
use crate::input::{InputSnapshot, InputSource};
use crate::render::{build_snapshot, RenderSnapshot};

/// Answer to "should the loop re-arm itself?"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    Next,
    Halt,
}

pub struct Session<R: Rng = StdRng> {
    state: SimulationState,
    rng: R,
}

impl Session<StdRng> {
    /// Session seeded from the config, or from entropy when no seed is set.
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session::with_rng(config, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: &GameConfig, rng: R) -> Self {
        log::debug!("new session, arena {}x{}", config.arena.width, config.arena.height);
        Session { state: init_state(config), rng }
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for scripted scenarios.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// `Idle → Running`. Ignored in any other state. The caller gates this
    /// on its own asset readiness.
    pub fn start(&mut self, events: &mut impl EventSink) -> bool {
        if self.state.status != GameStatus::Idle {
            log::debug!("start ignored in {:?}", self.state.status);
            return false;
        }
        self.state.status = GameStatus::Running;
        log::info!("game started");
        self.emit_stats(events);
        true
    }

    /// `GameOver → Running` with everything reset. Ignored otherwise.
    pub fn restart(&mut self, events: &mut impl EventSink) -> bool {
        if self.state.status != GameStatus::GameOver {
            log::debug!("restart ignored in {:?}", self.state.status);
            return false;
        }
        reset_state(&mut self.state);
        self.state.status = GameStatus::Running;
        log::info!("game restarted");
        self.emit_stats(events);
        events.hud(HudUpdate::BuffChanged { buff: Buff::RapidFire, active: false });
        events.hud(HudUpdate::BuffChanged { buff: Buff::Shield, active: false });
        true
    }

    /// Run one tick if the game is running. `now_ms` is wall-clock time
    /// since the session began.
    pub fn frame(&mut self, input: &InputSnapshot, now_ms: u64, events: &mut impl EventSink) -> Schedule {
        if self.state.status != GameStatus::Running {
            return Schedule::Halt;
        }
        match tick(&mut self.state, input, now_ms, &mut self.rng, events) {
            TickOutcome::Continue => Schedule::Next,
            TickOutcome::GameOver => Schedule::Halt,
        }
    }

    /// `frame` with input pulled from a provider.
    pub fn frame_from(&mut self, source: &mut impl InputSource, now_ms: u64, events: &mut impl EventSink) -> Schedule {
        if self.state.status != GameStatus::Running {
            return Schedule::Halt;
        }
        let input = source.poll();
        self.frame(&input, now_ms, events)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        build_snapshot(&self.state)
    }

    fn emit_stats(&self, events: &mut impl EventSink) {
        events.hud(HudUpdate::Stats {
            health: self.state.player.display_health(),
            score: self.state.score,
        });
    }
}
