//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (passed in by the caller)
//! - No rendering, audio, or platform dependencies
//! - Side effects are reported as [`TickEvent`]s for the presentation layer

pub mod ai;
pub mod state;
pub mod tick;

pub use ai::AiPlayer;
pub use state::{Ball, Bat, GameState, RoundOutcome, Winner};
pub use tick::{TickEvent, apply_player_input, update};
