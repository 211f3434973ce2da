// SPDX-License-Identifier: GPL-3.0-only
//! LG UltraFine specifications

use crate::devices::DeviceSpec;

/// USB Product ID for the LG UltraFine display
pub const PRODUCT_ID: u16 = 0x9a40;

/// USB interface carrying the brightness feature report
pub const INTERFACE_NUMBER: u8 = 1;

/// Highest raw brightness value the panel accepts
pub const MAX_BRIGHTNESS: u16 = 54000;

/// Lowest raw brightness value considered safe (1% of the range)
pub const MIN_BRIGHTNESS: u16 = 540;

/// Device specification for the LG UltraFine display
///
/// Brightness is exposed as a HID feature report on interface 1 and is
/// addressed with class control transfers rather than through hidraw.
pub const SPEC: DeviceSpec = DeviceSpec {
    product_id: PRODUCT_ID,
    vendor_id: super::VENDOR_ID,
    name: "LG UltraFine Display",
    interface_number: INTERFACE_NUMBER,
    min_brightness_value: MIN_BRIGHTNESS,
    max_brightness_value: MAX_BRIGHTNESS,
};
