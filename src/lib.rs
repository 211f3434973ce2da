// SPDX-License-Identifier: GPL-3.0-only
//! Backlight brightness control for the LG UltraFine display
//!
//! The display exposes its backlight level as a 16-bit HID feature report.
//! [`BrightnessSession`] reads and writes it with USB control transfers and
//! keeps every value inside the panel's safe operating range.

#[macro_use]
extern crate tracing;

pub mod devices;
pub mod error;
pub mod protocols;
pub mod session;

pub use devices::lg::ultrafine::{MAX_BRIGHTNESS, MIN_BRIGHTNESS};
pub use error::{BrightnessError, Result};
pub use session::{BrightnessSession, MAX_RAISE_AMOUNT, check_brightness};
