//! VCS Pong - one human, one AI, one canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, AI paddle)
//! - `input`: Gamepad classification and normalization (Atari VCS + standard pads)
//! - `round`: Round lifecycle state machine, driven once per animation frame
//! - `render`/`audio`: 2D-canvas and WebAudio presentation sinks (wasm only)

pub mod input;
pub mod round;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use round::{Round, RoundError, RoundPhase};

/// Game configuration constants
pub mod consts {
    /// Playfield width in normalized coordinates
    pub const FIELD_WIDTH: f32 = 1.0;
    /// Playfield height in normalized coordinates (4:3 aspect)
    pub const FIELD_HEIGHT: f32 = 0.75;

    /// Bat center distance from its goal edge
    pub const BAT_MARGIN: f32 = 0.04;
    pub const BAT_WIDTH: f32 = 0.04;
    pub const BAT_HEIGHT: f32 = 0.2;
    pub const BALL_SIZE: f32 = 0.04;

    /// Serve speed range (magnitude is never zero)
    pub const SERVE_SPEED_MIN: f32 = 0.5;
    pub const SERVE_SPEED_MAX: f32 = 0.8;

    /// Speed multiplier applied on every bat bounce
    pub const BOUNCE_SPEED_UP: f32 = 1.05;
    /// Maximum random exit-angle jitter on a bat bounce (degrees)
    pub const BOUNCE_JITTER_DEG: f32 = 5.0;

    /// Human paddle speed at full stick deflection
    pub const PLAYER_SPEED: f32 = 0.4;
    /// AI paddle velocity and acceleration limits
    pub const AI_SPEED: f32 = 0.4;
    pub const AI_ACCEL: f32 = 0.1;

    /// Atari first-party vendor id (decimal, as reported in gamepad id strings)
    pub const ATARI_VENDOR: u32 = 3250;
    /// Modern VCS controller product id
    pub const ATARI_PRODUCT_CONTROLLER: u32 = 1002;
    /// Classic joystick product id
    pub const ATARI_PRODUCT_JOYSTICK: u32 = 1001;

    /// Twist low-pass filter time constant (milliseconds)
    pub const TWIST_RC_MS: f64 = 50.0;

    /// Start-button poll cadence while no round is running (milliseconds)
    pub const IDLE_POLL_MS: f64 = 100.0;
}
