//! Raw device snapshot
//!
//! A plain-data copy of what the platform's gamepad source reports for one
//! device on one poll. The rest of the input layer works only on snapshots,
//! never on live platform handles, so it stays testable off-browser.

/// Pressed flag plus analog value for one physical button
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ButtonState {
    pub pressed: bool,
    pub value: f32,
}

impl ButtonState {
    /// A fully pressed button
    pub fn down() -> Self {
        Self {
            pressed: true,
            value: 1.0,
        }
    }
}

/// Capability-mapping marker reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    /// The device follows the standard gamepad layout
    Standard,
    /// Vendor-specific layout, identified by the id string instead
    NonStandard,
}

/// One device, one poll
#[derive(Debug, Clone)]
pub struct GamepadSnapshot {
    /// Stable connection index assigned by the platform
    pub index: u32,
    /// Free-text identity string, e.g. "Foo (Vendor: 3250 Product: 1002)"
    pub id: String,
    pub mapping: MappingKind,
    pub buttons: Vec<ButtonState>,
    /// Axis values in [-1, 1]
    pub axes: Vec<f32>,
}

impl GamepadSnapshot {
    /// Pressed flag for a button index, absent buttons read as released
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).is_some_and(|b| b.pressed)
    }

    /// Axis value for an index, absent axes read as centered
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }
}
