//! Gamepad input layer
//!
//! Raw hardware snapshots come in from the platform, get classified into a
//! known device profile and read out as a uniform [`ControlState`]. The
//! registry owns per-device filter caches keyed by connection index.

pub mod classify;
pub mod device;
pub mod normalize;
pub mod registry;

pub use classify::{DeviceProfile, classify};
pub use device::{ButtonState, GamepadSnapshot, MappingKind};
pub use normalize::{Buttons, ControlState, StickInput, Triggers, TwistFilter, read};
pub use registry::ControllerRegistry;
