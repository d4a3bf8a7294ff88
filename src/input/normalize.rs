//! Input normalization
//!
//! Turns a classified raw snapshot into a uniform [`ControlState`]. Each
//! profile has a fixed index table; fields the hardware cannot produce stay
//! `None` and must be treated as neutral by consumers.
//!
//! The classic joystick is the odd one out: its x axis is a wrapping twist
//! ring, so instead of exposing it raw it runs through an RC low-pass
//! filter and is reported as a shortest-path delta per read.

use glam::Vec2;

use crate::consts::TWIST_RC_MS;

use super::classify::DeviceProfile;
use super::device::GamepadSnapshot;

/// Named pressed-flags for the logical buttons a profile can expose
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub lb: bool,
    pub rb: bool,
    pub lsb: bool,
    pub rsb: bool,
}

/// Classic-joystick stick reading: deflection plus smoothed twist delta
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickInput {
    pub pos: Vec2,
    /// Shortest signed change of the filtered twist angle since the last
    /// read, on a domain wrapping every 2 units
    pub twist: f32,
}

/// Analog trigger pair in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triggers {
    pub left: f32,
    pub right: f32,
}

/// Uniform logical snapshot of one device for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlState {
    pub buttons: Buttons,
    /// Classic joystick stick
    pub stick: Option<StickInput>,
    pub left_stick: Option<Vec2>,
    pub right_stick: Option<Vec2>,
    /// Each component is -1, 0 or 1
    pub dpad: Option<Vec2>,
    pub triggers: Option<Triggers>,
    /// Set for the reduced-capability classic joystick
    pub classic: bool,
}

/// RC low-pass filter state for one device's twist axis.
///
/// The first sample seeds the filter (zero elapsed time, previous value
/// equal to the raw input) so it reports no change. The cache belongs to
/// the device index, not the profile, and survives reclassification.
#[derive(Debug, Clone, Default)]
pub struct TwistFilter {
    /// Last filtered value and its wall-clock sample time (ms)
    last: Option<(f32, f64)>,
}

impl TwistFilter {
    /// Feed one raw sample, returning the filtered twist delta
    pub fn sample(&mut self, raw: f32, now_ms: f64) -> f32 {
        let (prev, prev_time) = self.last.unwrap_or((raw, now_ms));
        let dt = now_ms - prev_time;
        let a = (dt / (TWIST_RC_MS + dt)) as f32;
        let filtered = raw * a + prev * (1.0 - a);
        self.last = Some((filtered, now_ms));
        twist_change(prev, filtered)
    }

    /// Current filtered value, if any sample has been taken
    pub fn value(&self) -> Option<f32> {
        self.last.map(|(v, _)| v)
    }
}

/// Shortest signed angular change between two twist values on a domain
/// that wraps every 2 units, so crossing the +1/-1 seam reports the short
/// way around.
pub fn twist_change(old: f32, new: f32) -> f32 {
    let d1 = new - old;
    if d1 == 0.0 {
        return 0.0;
    }
    let d2 = d1 - d1.signum() * 2.0;
    if d1.abs() < d2.abs() { d1 } else { d2 }
}

/// Read a classified device into a logical control state.
///
/// `now_ms` is the wall-clock sample time used by the twist filter; it is
/// ignored for profiles without a twist axis.
pub fn read(
    pad: &GamepadSnapshot,
    profile: DeviceProfile,
    twist: &mut TwistFilter,
    now_ms: f64,
) -> ControlState {
    match profile {
        DeviceProfile::AtariJoystick => ControlState {
            buttons: Buttons {
                a: pad.button(0),
                b: pad.button(1),
                ..Buttons::default()
            },
            stick: Some(StickInput {
                pos: Vec2::new(pad.axis(1), pad.axis(2)),
                twist: twist.sample(pad.axis(0), now_ms),
            }),
            classic: true,
            ..ControlState::default()
        },
        DeviceProfile::AtariController => ControlState {
            buttons: Buttons {
                a: pad.button(0),
                b: pad.button(1),
                x: pad.button(2),
                y: pad.button(3),
                lb: pad.button(4),
                rb: pad.button(5),
                lsb: pad.button(6),
                rsb: pad.button(7),
            },
            left_stick: Some(Vec2::new(pad.axis(0), pad.axis(1))),
            right_stick: Some(Vec2::new(pad.axis(2), pad.axis(3))),
            dpad: Some(Vec2::new(pad.axis(6), pad.axis(7))),
            triggers: Some(Triggers {
                left: pad.axis(5),
                right: pad.axis(4),
            }),
            classic: false,
            ..ControlState::default()
        },
        DeviceProfile::GenericController => ControlState {
            buttons: Buttons {
                a: pad.button(0),
                b: pad.button(1),
                x: pad.button(2),
                y: pad.button(3),
                lb: pad.button(4),
                rb: pad.button(5),
                lsb: pad.button(10),
                rsb: pad.button(11),
            },
            left_stick: Some(Vec2::new(pad.axis(0), pad.axis(1))),
            right_stick: Some(Vec2::new(pad.axis(2), pad.axis(3))),
            // Standard layout reports the dpad as four discrete buttons
            dpad: Some(Vec2::new(
                (pad.button(15) as i8 - pad.button(14) as i8) as f32,
                (pad.button(13) as i8 - pad.button(12) as i8) as f32,
            )),
            triggers: Some(Triggers {
                left: if pad.button(6) { 1.0 } else { -1.0 },
                right: if pad.button(7) { 1.0 } else { -1.0 },
            }),
            classic: false,
            ..ControlState::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::device::{ButtonState, MappingKind};

    fn snapshot(buttons: Vec<ButtonState>, axes: Vec<f32>) -> GamepadSnapshot {
        GamepadSnapshot {
            index: 0,
            id: String::new(),
            mapping: MappingKind::NonStandard,
            buttons,
            axes,
        }
    }

    fn pressed_at(indices: &[usize], len: usize) -> Vec<ButtonState> {
        let mut buttons = vec![ButtonState::default(); len];
        for &i in indices {
            buttons[i] = ButtonState::down();
        }
        buttons
    }

    #[test]
    fn test_joystick_read_table() {
        let pad = snapshot(pressed_at(&[0], 2), vec![0.0, 0.25, -0.5]);
        let mut twist = TwistFilter::default();

        let state = read(&pad, DeviceProfile::AtariJoystick, &mut twist, 0.0);
        assert!(state.classic);
        assert!(state.buttons.a);
        assert!(!state.buttons.b);

        let stick = state.stick.unwrap();
        assert_eq!(stick.pos, Vec2::new(0.25, -0.5));
        // First sample seeds the filter: no countable change
        assert_eq!(stick.twist, 0.0);

        assert!(state.left_stick.is_none());
        assert!(state.dpad.is_none());
        assert!(state.triggers.is_none());
    }

    #[test]
    fn test_atari_controller_read_table() {
        let pad = snapshot(
            pressed_at(&[0, 3, 7], 8),
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, -1.0, 1.0],
        );
        let mut twist = TwistFilter::default();

        let state = read(&pad, DeviceProfile::AtariController, &mut twist, 0.0);
        assert!(!state.classic);
        assert!(state.buttons.a && state.buttons.y && state.buttons.rsb);
        assert!(!state.buttons.b);

        assert_eq!(state.left_stick, Some(Vec2::new(0.1, 0.2)));
        assert_eq!(state.right_stick, Some(Vec2::new(0.3, 0.4)));
        assert_eq!(state.dpad, Some(Vec2::new(-1.0, 1.0)));
        // Trigger axes are swapped on this hardware: left is axis 5
        assert_eq!(
            state.triggers,
            Some(Triggers {
                left: 0.6,
                right: 0.5
            })
        );
        assert!(state.stick.is_none());
    }

    #[test]
    fn test_generic_read_table() {
        // dpad-up (12) and dpad-right (15) held, right trigger (7) held,
        // left stick button (10) held
        let pad = snapshot(pressed_at(&[1, 7, 10, 12, 15], 16), vec![0.1, 0.2, 0.3, 0.4]);
        let mut twist = TwistFilter::default();

        let state = read(&pad, DeviceProfile::GenericController, &mut twist, 0.0);
        assert!(state.buttons.b && state.buttons.lsb);
        assert!(!state.buttons.rsb);
        assert_eq!(state.dpad, Some(Vec2::new(1.0, -1.0)));
        assert_eq!(
            state.triggers,
            Some(Triggers {
                left: -1.0,
                right: 1.0
            })
        );
    }

    #[test]
    fn test_twist_filter_converges_monotonically() {
        let mut filter = TwistFilter::default();
        filter.sample(0.0, 0.0);

        // Constant raw input: filtered value climbs toward it and every
        // reported delta is a positive, shrinking step
        let mut prev_value = 0.0;
        let mut prev_delta = f32::INFINITY;
        for i in 1..20 {
            let now = i as f64 * 16.0;
            let delta = filter.sample(1.0, now);
            let value = filter.value().unwrap();
            assert!(delta > 0.0);
            assert!(delta <= prev_delta);
            assert!(value > prev_value && value < 1.0);
            prev_value = value;
            prev_delta = delta;
        }
        assert!(prev_value > 0.9);
    }

    #[test]
    fn test_twist_first_sample_reports_no_change() {
        let mut filter = TwistFilter::default();
        assert_eq!(filter.sample(0.7, 12345.0), 0.0);
        assert_eq!(filter.value(), Some(0.7));
    }

    #[test]
    fn test_twist_change_wraps_at_seam() {
        // Crossing from +0.9 to -0.9 is a short +0.2 step the wrapping
        // way around, same sign and size as a plain 0.7 -> 0.9 move
        let wrapped = twist_change(0.9, -0.9);
        let plain = twist_change(0.7, 0.9);
        assert!((wrapped - 0.2).abs() < 1e-6);
        assert!((wrapped - plain).abs() < 1e-6);

        let wrapped = twist_change(-0.9, 0.9);
        assert!((wrapped + 0.2).abs() < 1e-6);

        assert_eq!(twist_change(0.3, 0.3), 0.0);
    }

    #[test]
    fn test_missing_buttons_and_axes_read_neutral() {
        let pad = snapshot(Vec::new(), Vec::new());
        let mut twist = TwistFilter::default();

        let state = read(&pad, DeviceProfile::GenericController, &mut twist, 0.0);
        assert_eq!(state.buttons, Buttons::default());
        assert_eq!(state.left_stick, Some(Vec2::ZERO));
        assert_eq!(state.dpad, Some(Vec2::ZERO));
    }
}
