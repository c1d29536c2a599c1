//! The per-tick input contract.
//!
//! Keyboard+pointer and stick/touch bindings are alternate providers of the
//! same `InputSnapshot`; the simulation never sees raw device events.

/// One tick's worth of player intent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Movement direction, each axis in `[-1, 1]`.
    pub move_x: f32,
    pub move_y: f32,
    /// Pointer-mode heading. `None` selects stick-mode aiming.
    pub aim_angle: Option<f32>,
    pub fire: bool,
}

impl InputSnapshot {
    /// Build a snapshot from four held directions (keys or a d-pad).
    pub fn from_directions(up: bool, down: bool, left: bool, right: bool) -> Self {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        InputSnapshot {
            move_x: axis(left, right),
            move_y: axis(up, down),
            ..Default::default()
        }
    }

    pub fn with_aim(mut self, angle: f32) -> Self {
        self.aim_angle = Some(angle);
        self
    }

    pub fn with_fire(mut self, fire: bool) -> Self {
        self.fire = fire;
        self
    }

    /// Copy with each axis clamped to `[-1, 1]` and NaN treated as 0.
    pub fn clamped(self) -> Self {
        let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        InputSnapshot {
            move_x: clamp(self.move_x),
            move_y: clamp(self.move_y),
            ..self
        }
    }

    pub fn is_moving(&self) -> bool {
        self.move_x != 0.0 || self.move_y != 0.0
    }
}

/// Anything that can be polled once per tick for player intent.
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

impl InputSource for InputSnapshot {
    fn poll(&mut self) -> InputSnapshot {
        *self
    }
}
