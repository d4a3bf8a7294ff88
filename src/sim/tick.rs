//! Per-frame physics and rules update
//!
//! One call to [`update`] advances the ball, clamps the bats, resolves bat
//! and wall bounces and decides whether a goal was scored. The order of the
//! checks is load-bearing: left bat, right bat, top wall, bottom wall, left
//! goal, right goal. Sounds are reported as [`TickEvent`]s, never played here.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Bat, GameState, RoundOutcome, Winner};
use crate::consts::*;
use crate::input::ControlState;

/// Fire-and-forget notification for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Ball bounced off a bat
    BatHit,
    /// Ball bounced off the top or bottom wall
    WallHit,
    /// Ball crossed a goal edge
    Crash,
}

/// Advance the simulation by `dt` seconds.
///
/// Returns the round outcome once the ball exits a goal edge; `None` while
/// play continues. At most one outcome is produced per tick.
pub fn update(
    state: &mut GameState,
    rng: &mut impl Rng,
    dt: f32,
    events: &mut Vec<TickEvent>,
) -> Option<RoundOutcome> {
    state.ball.pos += state.ball.vel * dt;
    state.left_bat.clamp_y();
    state.right_bat.clamp_y();

    if overlaps(&state.left_bat, &state.ball) {
        // Snap flush against the bat face before reflecting
        state.ball.pos.x =
            state.left_bat.pos.x + state.left_bat.size.x / 2.0 + state.ball.size.x / 2.0;
        bounce_off_bat(&mut state.ball, rng);
        events.push(TickEvent::BatHit);
    }
    if overlaps(&state.right_bat, &state.ball) {
        state.ball.pos.x =
            state.right_bat.pos.x - state.right_bat.size.x / 2.0 - state.ball.size.x / 2.0;
        bounce_off_bat(&mut state.ball, rng);
        events.push(TickEvent::BatHit);
    }

    let half_h = state.ball.size.y / 2.0;
    if state.ball.pos.y < half_h {
        state.ball.pos.y = half_h;
        state.ball.vel.y = -state.ball.vel.y;
        events.push(TickEvent::WallHit);
    }
    if state.ball.pos.y > FIELD_HEIGHT - half_h {
        state.ball.pos.y = FIELD_HEIGHT - half_h;
        state.ball.vel.y = -state.ball.vel.y;
        events.push(TickEvent::WallHit);
    }

    let half_w = state.ball.size.x / 2.0;
    if state.ball.pos.x < half_w {
        state.ball.pos.x = half_w;
        events.push(TickEvent::Crash);
        return Some(RoundOutcome { winner: Winner::Ai });
    } else if state.ball.pos.x > FIELD_WIDTH - half_w {
        state.ball.pos.x = FIELD_WIDTH - half_w;
        events.push(TickEvent::Crash);
        return Some(RoundOutcome {
            winner: Winner::Player,
        });
    }

    None
}

/// Move the human bat from a logical control snapshot.
///
/// Any vertical input the device offers contributes: classic stick, left
/// stick and dpad sum together, saturating at full deflection.
pub fn apply_player_input(state: &mut GameState, controls: &ControlState, dt: f32) {
    let mut movement = 0.0;
    if let Some(stick) = &controls.stick {
        movement += stick.pos.y;
    }
    if let Some(left) = &controls.left_stick {
        movement += left.y;
    }
    if let Some(dpad) = &controls.dpad {
        movement += dpad.y;
    }
    state.left_bat.pos.y += dt * PLAYER_SPEED * movement.clamp(-1.0, 1.0);
}

/// Inclusive AABB overlap test: touching edges count as a hit
fn overlaps(bat: &Bat, ball: &Ball) -> bool {
    let overlap_x = (bat.pos.x + bat.size.x / 2.0).min(ball.pos.x + ball.size.x / 2.0)
        - (bat.pos.x - bat.size.x / 2.0).max(ball.pos.x - ball.size.x / 2.0);
    let overlap_y = (bat.pos.y + bat.size.y / 2.0).min(ball.pos.y + ball.size.y / 2.0)
        - (bat.pos.y - bat.size.y / 2.0).max(ball.pos.y - ball.size.y / 2.0);
    overlap_x >= 0.0 && overlap_y >= 0.0
}

/// Mirror the x component, speed the ball up slightly and jitter the exit
/// angle by up to ±5 degrees so rallies never settle into a fixed loop.
fn bounce_off_bat(ball: &mut Ball, rng: &mut impl Rng) {
    let mag = ball.vel.length() * BOUNCE_SPEED_UP;
    let mut angle = ball.vel.y.atan2(-ball.vel.x);
    angle += BOUNCE_JITTER_DEG * rng.random_range(-1.0..1.0f32) * std::f32::consts::PI / 180.0;
    ball.vel = Vec2::new(angle.cos() * mag, angle.sin() * mag);
}
