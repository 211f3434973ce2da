// SPDX-License-Identifier: GPL-3.0-only
//! Brightness control protocol
//!
//! The display exposes its backlight as a HID feature report, read and
//! written with class control transfers on the brightness interface:
//!
//! | Operation | Direction | bRequest | wValue | wIndex | Length |
//! |-----------|-----------|----------|--------|--------|--------|
//! | Get       | IN        | `0x01`   | `768`  | `1`    | 8      |
//! | Set       | OUT       | `0x09`   | `768`  | `1`    | 6      |
//!
//! The first two bytes of either payload hold the brightness as a
//! little-endian `u16`.

pub mod usb_control;

use std::time::Duration;

use rusb::{Direction, Recipient, RequestType};

/// HID class request: GET_REPORT
pub const HID_GET_REPORT: u8 = 0x01;

/// HID class request: SET_REPORT
pub const HID_SET_REPORT: u8 = 0x09;

/// HID report type for feature reports (high byte of wValue)
pub const HID_REPORT_TYPE_FEATURE: u16 = 0x03;

/// wValue addressing feature report 0
pub const BRIGHTNESS_REPORT_VALUE: u16 = HID_REPORT_TYPE_FEATURE << 8;

/// wIndex of the brightness interface
pub const BRIGHTNESS_REPORT_INDEX: u16 = crate::devices::lg::ultrafine::INTERFACE_NUMBER as u16;

/// Buffer length of a GET_REPORT transfer
pub const GET_REPORT_LEN: usize = 8;

/// Buffer length of a SET_REPORT transfer
pub const SET_REPORT_LEN: usize = 6;

/// Timeout applied to every control transfer
pub const CONTROL_TIMEOUT: Duration = Duration::from_secs(2);

/// bmRequestType for device-to-host class requests addressed to an interface
pub fn request_type_in() -> u8 {
    rusb::request_type(Direction::In, RequestType::Class, Recipient::Interface)
}

/// bmRequestType for host-to-device class requests addressed to an interface
pub fn request_type_out() -> u8 {
    rusb::request_type(Direction::Out, RequestType::Class, Recipient::Interface)
}

/// Build the SET_REPORT payload for a brightness value
pub fn encode_brightness(value: u16) -> [u8; SET_REPORT_LEN] {
    let mut buf = [0u8; SET_REPORT_LEN];
    buf[..2].copy_from_slice(&value.to_le_bytes());
    buf
}

/// Extract the brightness value from a GET_REPORT payload
///
/// Returns `None` if fewer than two bytes were received.
pub fn decode_brightness(buf: &[u8]) -> Option<u16> {
    match buf {
        [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
        _ => None,
    }
}

/// Synchronous USB control endpoint used by a brightness session
///
/// Implementations own every resource needed to reach the device and give
/// them back in [`ControlTransport::release`].
pub trait ControlTransport: std::fmt::Debug {
    /// Issue a device-to-host control transfer, returning the bytes read
    fn read_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> rusb::Result<usize>;

    /// Issue a host-to-device control transfer, returning the bytes written
    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &[u8],
    ) -> rusb::Result<usize>;

    /// Release the claimed interface, the device handle and the context
    ///
    /// Best effort: failures are logged, never returned. Must tolerate being
    /// called more than once.
    fn release(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_types() {
        assert_eq!(request_type_in(), 0xa1);
        assert_eq!(request_type_out(), 0x21);
    }

    #[test]
    fn test_report_addressing() {
        assert_eq!(BRIGHTNESS_REPORT_VALUE, 768);
        assert_eq!(BRIGHTNESS_REPORT_INDEX, 1);
    }

    #[test]
    fn test_encode_brightness() {
        assert_eq!(encode_brightness(1500), [0xdc, 0x05, 0, 0, 0, 0]);
        assert_eq!(encode_brightness(54000), [0xf0, 0xd2, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_brightness() {
        assert_eq!(decode_brightness(&[0xdc, 0x05, 0xff, 0xff, 0, 0, 0, 0]), Some(1500));
        assert_eq!(decode_brightness(&[0x1c, 0x02]), Some(540));
        assert_eq!(decode_brightness(&[0x1c]), None);
        assert_eq!(decode_brightness(&[]), None);
    }
}
