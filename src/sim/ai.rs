//! AI opponent
//!
//! A lead-pursuit controller for the right bat: estimate when the ball will
//! reach the bat's x, then pick the acceleration that closes both the
//! position and velocity gap by that time. Acceleration and velocity are
//! clamped so the AI stays beatable.

use super::state::GameState;
use crate::consts::*;

/// Closed-loop controller state for the AI bat.
///
/// The vertical velocity persists across ticks; it is owned here rather
/// than in [`GameState`] because it belongs to the controller, not the
/// round.
#[derive(Debug, Clone, Default)]
pub struct AiPlayer {
    vy: f32,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current vertical velocity command
    pub fn velocity(&self) -> f32 {
        self.vy
    }

    /// Advance the AI bat by one tick.
    ///
    /// When the ball's horizontal velocity is zero (or the intercept time
    /// degenerates to zero) the intercept estimate is undefined; the tick
    /// is skipped and the previous velocity is kept, so no non-finite
    /// value can ever reach the bat position.
    pub fn update(&mut self, state: &mut GameState, dt: f32) {
        let ball = &state.ball;
        let bat = &mut state.right_bat;

        let t = ((bat.pos.x - ball.pos.x) / ball.vel.x).abs();
        if !t.is_finite() || t == 0.0 {
            return;
        }

        let dvy = ball.vel.y - self.vy;
        let dy = ball.pos.y - bat.pos.y;
        let ay = 2.0 * (dy + dvy * t) / (t * t);
        if !ay.is_finite() {
            return;
        }

        self.vy += ay.clamp(-AI_ACCEL, AI_ACCEL);
        self.vy = self.vy.clamp(-AI_SPEED, AI_SPEED);
        bat.pos.y += self.vy * dt;
    }
}
