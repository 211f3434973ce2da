// SPDX-License-Identifier: GPL-3.0-only
//! Error types for brightness sessions
//!
//! Every failure mode of a session maps to one variant, so callers can tell a
//! device problem apart from a value that is out of policy or a relative
//! adjustment that would wrap.

use thiserror::Error;

use crate::devices::lg::ultrafine::{MAX_BRIGHTNESS, MIN_BRIGHTNESS};

/// Brightness session error type
#[derive(Error, Debug)]
pub enum BrightnessError {
    /// No USB device with the expected vendor/product id is attached
    #[error("Display {vendor_id:#06x}:{product_id:#06x} not found")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// The active configuration could not be read or the interface not claimed
    #[error("Configuration error: {context}: {source}")]
    Configuration {
        context: &'static str,
        #[source]
        source: rusb::Error,
    },

    /// A control transfer failed
    #[error("USB transport error: {0}")]
    Transport(#[from] rusb::Error),

    /// Value is above the hardware maximum
    #[error("Brightness ({0}) is over the max value {max}", max = MAX_BRIGHTNESS)]
    AboveMaximum(u16),

    /// Value is below the minimum while enforcement is on
    #[error(
        "Brightness ({0}) is lower than the minimum value {min} and enforcement is on",
        min = MIN_BRIGHTNESS
    )]
    BelowMinimum(u16),

    /// Raising by this amount could overflow a 16-bit value
    #[error("Raising the brightness by {0} would overflow")]
    Overflow(u16),

    /// Lowering by this amount would go below zero
    #[error("Lowering the brightness ({current}) by {amount} would cause a negative value")]
    Underflow { current: u16, amount: u16 },

    /// The session has already been closed
    #[error("Session is closed")]
    SessionClosed,
}

impl BrightnessError {
    pub(crate) fn configuration(context: &'static str, source: rusb::Error) -> Self {
        Self::Configuration { context, source }
    }
}

/// Result type alias for BrightnessError
pub type Result<T> = std::result::Result<T, BrightnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_messages_name_the_limits() {
        assert_eq!(
            BrightnessError::AboveMaximum(60000).to_string(),
            "Brightness (60000) is over the max value 54000"
        );
        assert_eq!(
            BrightnessError::BelowMinimum(100).to_string(),
            "Brightness (100) is lower than the minimum value 540 and enforcement is on"
        );
    }

    #[test]
    fn test_transport_converts_from_rusb() {
        let err: BrightnessError = rusb::Error::Access.into();
        assert!(matches!(err, BrightnessError::Transport(rusb::Error::Access)));
    }
}
