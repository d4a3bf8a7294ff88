//! Game state and core simulation types
//!
//! Everything that describes one round in flight. A fresh `GameState` is
//! created when a round starts and discarded when it ends.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which side won a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// The human, defending the left goal
    Player,
    /// The AI, defending the right goal
    Ai,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Player => "player",
            Winner::Ai => "ai",
        }
    }
}

/// Terminal result of a round, produced exactly once when the ball
/// exits through a goal edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub winner: Winner,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position in playfield coordinates
    pub pos: Vec2,
    /// Width/height of the bounding box
    pub size: Vec2,
    /// Velocity in playfield units per second
    pub vel: Vec2,
}

/// A bat. `pos.x` is fixed per side; only `pos.y` ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bat {
    /// Center position in playfield coordinates
    pub pos: Vec2,
    /// Width/height of the bounding box
    pub size: Vec2,
}

impl Bat {
    /// Clamp the bat center so the bat stays fully inside the playfield
    pub fn clamp_y(&mut self) {
        let half = self.size.y / 2.0;
        self.pos.y = self.pos.y.clamp(half, FIELD_HEIGHT - half);
    }
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    /// Human bat, left edge
    pub left_bat: Bat,
    /// AI bat, right edge
    pub right_bat: Bat,
}

impl GameState {
    /// Initial state: ball in the middle with a random serve velocity,
    /// bats centered on their edges.
    pub fn new(rng: &mut impl Rng) -> Self {
        let speed = rng.random_range(SERVE_SPEED_MIN..SERVE_SPEED_MAX);
        Self {
            ball: Ball {
                pos: Vec2::new(0.5, 0.5),
                size: Vec2::splat(BALL_SIZE),
                vel: serve_velocity(rng, speed),
            },
            left_bat: Bat {
                pos: Vec2::new(BAT_MARGIN, 0.5),
                size: Vec2::new(BAT_WIDTH, BAT_HEIGHT),
            },
            right_bat: Bat {
                pos: Vec2::new(FIELD_WIDTH - BAT_MARGIN, 0.5),
                size: Vec2::new(BAT_WIDTH, BAT_HEIGHT),
            },
        }
    }
}

/// Pick a serve direction: within 45 degrees of horizontal, aimed at either
/// goal with equal probability. The x component is never zero.
pub fn serve_velocity(rng: &mut impl Rng, speed: f32) -> Vec2 {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
    let roll: f32 = rng.random_range(0.0..1.0);
    let angle = if roll > 0.5 {
        (roll - 0.5) * FRAC_PI_2 + FRAC_PI_4
    } else {
        roll * -FRAC_PI_2 - FRAC_PI_4
    };
    // Angle is measured from the y axis, so sin drives x and cos drives y
    Vec2::new(angle.sin() * speed, angle.cos() * speed)
}
