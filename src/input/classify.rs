//! Device classification
//!
//! Maps a raw hardware snapshot to one of a small set of known profiles.
//! Standard-mapping devices are generic; everything else must carry an
//! Atari vendor/product pair in its id string, with a capability-count
//! fallback so newer Atari hardware degrades to the nearest known shape
//! instead of failing hard.

use crate::consts::*;

use super::device::{GamepadSnapshot, MappingKind};

/// Classification result: which read table applies to a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceProfile {
    /// Any device with a standard capability mapping
    GenericController,
    /// Atari VCS modern controller (full button/stick complement)
    AtariController,
    /// Atari VCS classic joystick (two buttons, stick, twist axis)
    AtariJoystick,
}

impl DeviceProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceProfile::GenericController => "generic controller",
            DeviceProfile::AtariController => "Atari controller",
            DeviceProfile::AtariJoystick => "Atari joystick",
        }
    }
}

/// Classify a device snapshot, `None` if it matches no known profile.
pub fn classify(pad: &GamepadSnapshot) -> Option<DeviceProfile> {
    if pad.mapping == MappingKind::Standard {
        return Some(DeviceProfile::GenericController);
    }

    let Some((vendor, product)) = parse_device_id(&pad.id) else {
        log::debug!("gamepad {} has unparseable id {:?}", pad.index, pad.id);
        return None;
    };
    if vendor != ATARI_VENDOR {
        return None;
    }

    match product {
        ATARI_PRODUCT_CONTROLLER => Some(DeviceProfile::AtariController),
        ATARI_PRODUCT_JOYSTICK => Some(DeviceProfile::AtariJoystick),
        // Unknown Atari product: fall back on capability counts so a new
        // controller revision still maps to an existing read table.
        _ if pad.buttons.len() >= 8 && pad.axes.len() >= 8 => Some(DeviceProfile::AtariController),
        _ if pad.buttons.len() >= 2 && pad.axes.len() >= 3 => Some(DeviceProfile::AtariJoystick),
        _ => None,
    }
}

/// Extract the `(Vendor: <int> Product: <int>)` pair out of an id string.
///
/// Whitespace around the numbers is tolerated; at least one whitespace
/// character must separate the vendor number from the `Product:` label.
pub fn parse_device_id(id: &str) -> Option<(u32, u32)> {
    for (open, _) in id.match_indices('(') {
        if let Some(pair) = parse_vendor_product(&id[open + 1..]) {
            return Some(pair);
        }
    }
    None
}

fn parse_vendor_product(s: &str) -> Option<(u32, u32)> {
    let s = s.trim_start().strip_prefix("Vendor:")?.trim_start();
    let (vendor, s) = take_decimal(s)?;
    if !s.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let s = s.trim_start().strip_prefix("Product:")?.trim_start();
    let (product, s) = take_decimal(s)?;
    s.trim_start().strip_prefix(')')?;
    Some((vendor, product))
}

fn take_decimal(s: &str) -> Option<(u32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::device::ButtonState;

    fn pad(id: &str, mapping: MappingKind, buttons: usize, axes: usize) -> GamepadSnapshot {
        GamepadSnapshot {
            index: 0,
            id: id.to_string(),
            mapping,
            buttons: vec![ButtonState::default(); buttons],
            axes: vec![0.0; axes],
        }
    }

    #[test]
    fn test_standard_mapping_is_generic() {
        // Identity string is irrelevant once the mapping is standard
        let p = pad("Weird Thing (Vendor: 9999 Product: 1)", MappingKind::Standard, 4, 2);
        assert_eq!(classify(&p), Some(DeviceProfile::GenericController));
    }

    #[test]
    fn test_atari_products() {
        let p = pad(
            "Foo (Vendor: 3250 Product: 1002)",
            MappingKind::NonStandard,
            0,
            0,
        );
        assert_eq!(classify(&p), Some(DeviceProfile::AtariController));

        let p = pad(
            "Classic (Vendor: 3250 Product: 1001)",
            MappingKind::NonStandard,
            0,
            0,
        );
        assert_eq!(classify(&p), Some(DeviceProfile::AtariJoystick));
    }

    #[test]
    fn test_unknown_atari_product_falls_back_on_capabilities() {
        let p = pad(
            "Next-gen (Vendor: 3250 Product: 1003)",
            MappingKind::NonStandard,
            8,
            8,
        );
        assert_eq!(classify(&p), Some(DeviceProfile::AtariController));

        let p = pad(
            "Next-gen (Vendor: 3250 Product: 1003)",
            MappingKind::NonStandard,
            2,
            3,
        );
        assert_eq!(classify(&p), Some(DeviceProfile::AtariJoystick));

        let p = pad(
            "Next-gen (Vendor: 3250 Product: 1003)",
            MappingKind::NonStandard,
            1,
            1,
        );
        assert_eq!(classify(&p), None);
    }

    #[test]
    fn test_other_vendors_unclassifiable() {
        let p = pad(
            "Pad (Vendor: 1133 Product: 1002)",
            MappingKind::NonStandard,
            16,
            8,
        );
        assert_eq!(classify(&p), None);
    }

    #[test]
    fn test_nonconforming_id_unclassifiable() {
        for id in ["", "Just a pad", "Vendor: 3250 Product: 1002", "(Vendor: abc Product: 1)"] {
            let p = pad(id, MappingKind::NonStandard, 8, 8);
            assert_eq!(classify(&p), None, "id {id:?}");
        }
    }

    #[test]
    fn test_id_parse_is_whitespace_tolerant() {
        assert_eq!(
            parse_device_id("Pad (  Vendor:   3250 \t Product: 1001  ) extra"),
            Some((3250, 1001))
        );
        assert_eq!(
            parse_device_id("Pad (misc) (Vendor: 3250 Product: 1002)"),
            Some((3250, 1002))
        );
        // Digits must be separated from the Product label
        assert_eq!(parse_device_id("(Vendor: 3250Product: 1002)"), None);
        // Closing paren is required
        assert_eq!(parse_device_id("(Vendor: 3250 Product: 1002"), None);
    }
}
