// SPDX-License-Identifier: GPL-3.0-only
//! Brightness session
//!
//! A session owns the control transport for one display. It is opened once,
//! used for any number of reads and writes, and closed exactly once, either
//! explicitly with [`BrightnessSession::close`] or when it is dropped.
//!
//! Every value read from or written to the device goes through
//! [`check_brightness`]. Relative adjustments refuse amounts that would wrap a
//! `u16` before anything is written.
//!
//! ```no_run
//! use lguf_brightness::BrightnessSession;
//!
//! # fn example() -> lguf_brightness::Result<()> {
//! let mut session = BrightnessSession::open()?;
//! let current = session.get_brightness()?;
//! session.set_brightness(current.saturating_add(540).min(lguf_brightness::MAX_BRIGHTNESS))?;
//! session.close()?;
//! # Ok(())
//! # }
//! ```

use crate::devices::lg::ultrafine::{self, MAX_BRIGHTNESS, MIN_BRIGHTNESS};
use crate::error::{BrightnessError, Result};
use crate::protocols::usb_control::UsbControlTransport;
use crate::protocols::{
    BRIGHTNESS_REPORT_INDEX, BRIGHTNESS_REPORT_VALUE, ControlTransport, GET_REPORT_LEN,
    HID_GET_REPORT, HID_SET_REPORT, decode_brightness, encode_brightness, request_type_in,
    request_type_out,
};

/// Largest amount `raise_brightness` accepts without risking a wrapped `u16`
pub const MAX_RAISE_AMOUNT: u16 = u16::MAX - MAX_BRIGHTNESS;

/// Validate a brightness value against the safe operating range
///
/// Values above [`MAX_BRIGHTNESS`] are always rejected. Values below
/// [`MIN_BRIGHTNESS`] are rejected only when `enforce_minimum` is set.
pub fn check_brightness(value: u16, enforce_minimum: bool) -> Result<()> {
    if value > MAX_BRIGHTNESS {
        return Err(BrightnessError::AboveMaximum(value));
    }
    if value < MIN_BRIGHTNESS && enforce_minimum {
        return Err(BrightnessError::BelowMinimum(value));
    }
    Ok(())
}

/// Open connection to the display's brightness register
#[derive(Debug)]
pub struct BrightnessSession<T: ControlTransport = UsbControlTransport> {
    /// `None` once the session has been closed
    transport: Option<T>,
    enforce_minimum: bool,
}

impl BrightnessSession<UsbControlTransport> {
    /// Open the LG UltraFine display and claim its brightness interface
    pub fn open() -> Result<Self> {
        let transport = UsbControlTransport::open(&ultrafine::SPEC)?;
        info!(
            "Opened brightness session on {} (configuration {})",
            ultrafine::SPEC.name,
            transport.configuration()
        );
        Ok(Self::with_transport(transport))
    }
}

impl<T: ControlTransport> BrightnessSession<T> {
    /// Wrap an already opened transport
    ///
    /// The minimum brightness is always enforced.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Some(transport),
            enforce_minimum: true,
        }
    }

    /// Whether values below [`MIN_BRIGHTNESS`] are rejected
    pub fn enforces_minimum(&self) -> bool {
        self.enforce_minimum
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    fn transport(&mut self) -> Result<&mut T> {
        self.transport.as_mut().ok_or(BrightnessError::SessionClosed)
    }

    fn check(&self, value: u16) -> Result<()> {
        check_brightness(value, self.enforce_minimum)
    }

    /// Read the current brightness from the device
    pub fn get_brightness(&mut self) -> Result<u16> {
        let mut buf = [0u8; GET_REPORT_LEN];

        let len = self.transport()?.read_control(
            request_type_in(),
            HID_GET_REPORT,
            BRIGHTNESS_REPORT_VALUE,
            BRIGHTNESS_REPORT_INDEX,
            &mut buf,
        )?;

        let value = decode_brightness(&buf[..len.min(buf.len())]).ok_or_else(|| {
            warn!("Short brightness report: {} byte(s)", len);
            BrightnessError::Transport(rusb::Error::Io)
        })?;

        debug!("Read brightness {} (report: {:02x?})", value, buf);

        self.check(value)?;
        Ok(value)
    }

    /// Write a new brightness value
    ///
    /// The value is validated before anything is sent to the device.
    pub fn set_brightness(&mut self, value: u16) -> Result<()> {
        if !self.is_open() {
            return Err(BrightnessError::SessionClosed);
        }
        self.check(value)?;

        let buf = encode_brightness(value);
        self.transport()?.write_control(
            request_type_out(),
            HID_SET_REPORT,
            BRIGHTNESS_REPORT_VALUE,
            BRIGHTNESS_REPORT_INDEX,
            &buf,
        )?;

        debug!("Set brightness to {}", value);
        Ok(())
    }

    /// Raise the brightness by `amount`, returning the new value
    pub fn raise_brightness(&mut self, amount: u16) -> Result<u16> {
        if !self.is_open() {
            return Err(BrightnessError::SessionClosed);
        }
        if amount > MAX_RAISE_AMOUNT {
            return Err(BrightnessError::Overflow(amount));
        }

        let current = self.get_brightness()?;
        let target = current
            .checked_add(amount)
            .ok_or(BrightnessError::Overflow(amount))?;

        debug!("Raising brightness {} -> {}", current, target);
        self.set_brightness(target)?;
        Ok(target)
    }

    /// Lower the brightness by `amount`, returning the new value
    pub fn lower_brightness(&mut self, amount: u16) -> Result<u16> {
        let current = self.get_brightness()?;
        if amount > current {
            return Err(BrightnessError::Underflow { current, amount });
        }

        let target = current - amount;
        debug!("Lowering brightness {} -> {}", current, target);
        self.set_brightness(target)?;
        Ok(target)
    }

    /// Release the device
    ///
    /// Release failures are logged and never reported. Closing a session
    /// twice returns [`BrightnessError::SessionClosed`].
    pub fn close(&mut self) -> Result<()> {
        let mut transport = self
            .transport
            .take()
            .ok_or(BrightnessError::SessionClosed)?;
        transport.release();
        info!("Closed brightness session");
        Ok(())
    }
}

impl<T: ControlTransport> Drop for BrightnessSession<T> {
    fn drop(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            debug!("Brightness session dropped while open, releasing device");
            transport.release();
        }
    }
}
