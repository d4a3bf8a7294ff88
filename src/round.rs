//! Round lifecycle
//!
//! One `Round` is one play-through from serve to goal. The driver calls
//! [`Round::frame`] once per rendered frame; the round derives its own dt
//! from consecutive frame timestamps (first frame uses dt = 0 so a stale
//! timestamp can never launch the ball across the field).
//!
//! Frame order matches the original game loop: physics and goal checks run
//! first, then the fresh controller sample and the AI move their bats. The
//! human bat therefore moves on input collected one rendered frame earlier;
//! that lag is a documented property of the game, not an accident, so it is
//! preserved here.

use rand_pcg::Pcg32;
use thiserror::Error;

use crate::input::ControlState;
use crate::sim::{AiPlayer, GameState, RoundOutcome, TickEvent, apply_player_input, update};

/// Where the outer wait-play-repeat loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Idling until the A button is pressed on any connected device
    WaitingForStart,
    Playing,
    /// Terminal; immediately re-arms `WaitingForStart`
    Finished,
}

/// Failures scoped to the current round. Nothing here is process-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The player's controller vanished mid-round: abort the round
    /// without an outcome.
    #[error("controller {0} disconnected mid-round")]
    ControllerDisconnected(u32),
}

/// One round in flight: simulation state plus the AI controller
#[derive(Debug)]
pub struct Round {
    state: GameState,
    ai: AiPlayer,
    controller: u32,
    prev_time: Option<f64>,
}

impl Round {
    /// Start a round on the given controller, serving a fresh ball
    pub fn new(controller: u32, rng: &mut Pcg32) -> Self {
        log::info!("round started on controller {controller}");
        Self {
            state: GameState::new(rng),
            ai: AiPlayer::new(),
            controller,
            prev_time: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Connection index of the controller driving the human bat
    pub fn controller(&self) -> u32 {
        self.controller
    }

    /// Advance the round by one frame.
    ///
    /// `controls` is the logical control snapshot read this frame, `None`
    /// if the device is gone or no longer classifiable. Bounce/crash
    /// notifications are appended to `events` for the presentation layer.
    pub fn frame(
        &mut self,
        now_ms: f64,
        controls: Option<&ControlState>,
        rng: &mut Pcg32,
        events: &mut Vec<TickEvent>,
    ) -> Result<Option<RoundOutcome>, RoundError> {
        let dt = match self.prev_time {
            Some(prev) => ((now_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.prev_time = Some(now_ms);

        if let Some(outcome) = update(&mut self.state, rng, dt, events) {
            log::info!("round over, winner: {}", outcome.winner.as_str());
            return Ok(Some(outcome));
        }

        let controls = controls.ok_or(RoundError::ControllerDisconnected(self.controller))?;
        apply_player_input(&mut self.state, controls, dt);
        self.ai.update(&mut self.state, dt);

        Ok(None)
    }
}
