// SPDX-License-Identifier: GPL-3.0-only
//! Device-specific configurations organized by manufacturer

pub mod lg;

/// Device specification for a display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSpec {
    /// USB Product ID
    pub product_id: u16,

    /// USB Vendor ID
    pub vendor_id: u16,

    /// Human-readable device name
    pub name: &'static str,

    /// Interface the brightness control transfers are addressed to
    pub interface_number: u8,

    /// Minimum brightness protocol value
    pub min_brightness_value: u16,

    /// Maximum brightness protocol value
    pub max_brightness_value: u16,
}

impl DeviceSpec {
    /// Get the brightness protocol value range (max - min)
    pub fn brightness_range(&self) -> u16 {
        self.max_brightness_value - self.min_brightness_value
    }

    /// Convert percentage (0-100) to protocol value for this device
    pub fn percentage_to_value(&self, percentage: u16) -> u16 {
        let percentage = u32::from(percentage.min(100));
        let range = u32::from(self.brightness_range());
        // range * 100 fits in u32 and the result is at most range
        self.min_brightness_value + (range * percentage / 100) as u16
    }

    /// Convert protocol value to percentage (0-100) for this device
    pub fn value_to_percentage(&self, value: u16) -> u16 {
        if value <= self.min_brightness_value {
            return 0;
        }
        if value >= self.max_brightness_value {
            return 100;
        }

        let range = f64::from(self.brightness_range());
        let percentage = (f64::from(value - self.min_brightness_value) / range * 100.0).round() as u16;
        percentage.min(100)
    }

    /// Convert a percentage of the full scale into raw units
    ///
    /// Used for relative adjustments, where 1% is always the same step
    /// regardless of the current level.
    pub fn percentage_to_step(&self, percentage: u16) -> u16 {
        let percentage = u32::from(percentage.min(100));
        (u32::from(self.max_brightness_value) * percentage / 100) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ultrafine_protocol_values() {
        let spec = lg::ultrafine::SPEC;

        assert_eq!(spec.min_brightness_value, 540);
        assert_eq!(spec.max_brightness_value, 54000);
        assert_eq!(spec.brightness_range(), 53460);
    }

    #[test]
    fn test_ultrafine_addressing() {
        let spec = lg::ultrafine::SPEC;
        assert_eq!(spec.product_id, 0x9a40);
        assert_eq!(spec.vendor_id, 0x043e); // LG vendor ID
        assert_eq!(spec.interface_number, 1);
        assert_eq!(spec.name, "LG UltraFine Display");
    }

    #[test]
    fn test_percentage_conversion_endpoints() {
        let spec = lg::ultrafine::SPEC;

        assert_eq!(spec.percentage_to_value(0), 540);
        assert_eq!(spec.percentage_to_value(100), 54000);
        assert_eq!(spec.percentage_to_value(250), 54000);
        assert_eq!(spec.percentage_to_value(50), 540 + 26730);
    }

    #[test]
    fn test_value_to_percentage_saturates() {
        let spec = lg::ultrafine::SPEC;

        assert_eq!(spec.value_to_percentage(0), 0);
        assert_eq!(spec.value_to_percentage(540), 0);
        assert_eq!(spec.value_to_percentage(54000), 100);
        assert_eq!(spec.value_to_percentage(u16::MAX), 100);
        assert_eq!(spec.value_to_percentage(540 + 26730), 50);
    }

    #[test]
    fn test_percentage_to_step() {
        let spec = lg::ultrafine::SPEC;

        assert_eq!(spec.percentage_to_step(1), 540);
        assert_eq!(spec.percentage_to_step(10), 5400);
        assert_eq!(spec.percentage_to_step(100), 54000);
    }
}
