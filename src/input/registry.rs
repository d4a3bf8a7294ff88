//! Active controller registry
//!
//! Process-owned list of connected devices plus the per-device twist
//! caches. The platform layer feeds connect/disconnect notifications in;
//! everything else only sees snapshot queries and `read`.

use std::collections::HashMap;

use super::classify::classify;
use super::device::GamepadSnapshot;
use super::normalize::{ControlState, TwistFilter, read};

/// Registry of connected devices, keyed by the platform's stable
/// connection index.
#[derive(Debug, Default)]
pub struct ControllerRegistry {
    filters: HashMap<u32, TwistFilter>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly connected device
    pub fn connect(&mut self, index: u32) {
        self.filters.entry(index).or_default();
        log::info!("controller {index} connected");
    }

    /// Drop a device and its filter cache
    pub fn disconnect(&mut self, index: u32) {
        self.filters.remove(&index);
        log::info!("controller {index} disconnected");
    }

    pub fn contains(&self, index: u32) -> bool {
        self.filters.contains_key(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Snapshot of connected indices, in stable order
    pub fn indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.filters.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    /// Classify and read one device snapshot.
    ///
    /// `None` means the device matches no known profile; the caller skips
    /// it (or, mid-round, treats the controller as gone). The twist cache
    /// for the index is created on first read if the connect notification
    /// never arrived.
    pub fn read(&mut self, pad: &GamepadSnapshot, now_ms: f64) -> Option<ControlState> {
        let profile = classify(pad)?;
        let twist = self.filters.entry(pad.index).or_default();
        Some(read(pad, profile, twist, now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::device::{ButtonState, MappingKind};

    fn joystick(index: u32, twist_axis: f32) -> GamepadSnapshot {
        GamepadSnapshot {
            index,
            id: "Classic (Vendor: 3250 Product: 1001)".to_string(),
            mapping: MappingKind::NonStandard,
            buttons: vec![ButtonState::default(); 2],
            axes: vec![twist_axis, 0.0, 0.0],
        }
    }

    #[test]
    fn test_connect_disconnect_lifecycle() {
        let mut registry = ControllerRegistry::new();
        assert!(registry.is_empty());

        registry.connect(2);
        registry.connect(0);
        assert!(registry.contains(2));
        assert_eq!(registry.indices(), vec![0, 2]);

        registry.disconnect(2);
        assert!(!registry.contains(2));
        assert_eq!(registry.indices(), vec![0]);
    }

    #[test]
    fn test_read_unclassifiable_is_none() {
        let mut registry = ControllerRegistry::new();
        let pad = GamepadSnapshot {
            index: 0,
            id: "Mystery pad".to_string(),
            mapping: MappingKind::NonStandard,
            buttons: Vec::new(),
            axes: Vec::new(),
        };
        assert!(registry.read(&pad, 0.0).is_none());
    }

    #[test]
    fn test_twist_cache_persists_across_reads() {
        let mut registry = ControllerRegistry::new();
        registry.connect(1);

        // Seed the filter at 0, then move the twist axis: the second read
        // must see the cached value and report a change
        registry.read(&joystick(1, 0.0), 0.0).unwrap();
        let state = registry.read(&joystick(1, 1.0), 100.0).unwrap();
        assert!(state.stick.unwrap().twist > 0.0);
    }

    #[test]
    fn test_disconnect_resets_twist_cache() {
        let mut registry = ControllerRegistry::new();

        registry.read(&joystick(3, 0.8), 0.0).unwrap();
        registry.disconnect(3);

        // Reconnecting starts a fresh filter: first read seeds, no change
        let state = registry.read(&joystick(3, -0.8), 50.0).unwrap();
        assert_eq!(state.stick.unwrap().twist, 0.0);
    }
}
