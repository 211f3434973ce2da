// SPDX-License-Identifier: GPL-3.0-only
//! libusb-backed control transport

use rusb::{Context, DeviceHandle, UsbContext};

use super::{CONTROL_TIMEOUT, ControlTransport};
use crate::devices::DeviceSpec;
use crate::error::{BrightnessError, Result};

/// Pick the first candidate whose `(vendor_id, product_id)` matches `spec`
pub(crate) fn find_matching<D>(
    candidates: impl IntoIterator<Item = ((u16, u16), D)>,
    spec: &DeviceSpec,
) -> Result<D> {
    candidates
        .into_iter()
        .find(|((vendor_id, product_id), _)| {
            *vendor_id == spec.vendor_id && *product_id == spec.product_id
        })
        .map(|(_, device)| device)
        .ok_or(BrightnessError::DeviceNotFound {
            vendor_id: spec.vendor_id,
            product_id: spec.product_id,
        })
}

/// Control transport talking to the display through libusb
pub struct UsbControlTransport {
    handle: Option<DeviceHandle<Context>>,
    context: Option<Context>,
    interface: u8,
    configuration: u8,
    name: &'static str,
}

impl UsbControlTransport {
    /// Open the device described by `spec` and claim its brightness interface
    ///
    /// Anything acquired before a failure is dropped on the way out, so an
    /// error never leaves the device handle or the context open.
    pub fn open(spec: &DeviceSpec) -> Result<Self> {
        let context = Context::new()?;

        let devices = context.devices()?;
        let candidates = devices.iter().filter_map(|device| match device.device_descriptor() {
            Ok(desc) => Some(((desc.vendor_id(), desc.product_id()), device)),
            Err(e) => {
                debug!("Skipping device without readable descriptor: {}", e);
                None
            }
        });
        let device = find_matching(candidates, spec)?;

        let handle = device.open().map_err(|e| {
            warn!(
                "Failed to open {}: {}. \
                 This may be a permissions issue. On Linux, ensure udev rules are configured.",
                spec.name, e
            );
            BrightnessError::Transport(e)
        })?;

        // Not supported on every platform; the claim below reports real problems
        if let Err(e) = handle.set_auto_detach_kernel_driver(true) {
            debug!("Kernel driver auto-detach unavailable for {}: {}", spec.name, e);
        }

        let configuration = handle
            .active_configuration()
            .map_err(|e| BrightnessError::configuration("failed to read active configuration", e))?;

        handle.claim_interface(spec.interface_number).map_err(|e| {
            warn!(
                "Failed to claim interface {} on {}: {}",
                spec.interface_number, spec.name, e
            );
            BrightnessError::configuration("failed to claim brightness interface", e)
        })?;

        debug!(
            "Opened {} ({:#06x}:{:#06x}) configuration={} interface={}",
            spec.name, spec.vendor_id, spec.product_id, configuration, spec.interface_number
        );

        Ok(Self {
            handle: Some(handle),
            context: Some(context),
            interface: spec.interface_number,
            configuration,
            name: spec.name,
        })
    }

    /// Active configuration number read while opening
    pub fn configuration(&self) -> u8 {
        self.configuration
    }

    fn handle(&mut self) -> rusb::Result<&mut DeviceHandle<Context>> {
        self.handle.as_mut().ok_or(rusb::Error::NoDevice)
    }
}

impl ControlTransport for UsbControlTransport {
    fn read_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
    ) -> rusb::Result<usize> {
        self.handle()?
            .read_control(request_type, request, value, index, buf, CONTROL_TIMEOUT)
    }

    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &[u8],
    ) -> rusb::Result<usize> {
        self.handle()?
            .write_control(request_type, request, value, index, buf, CONTROL_TIMEOUT)
    }

    fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.release_interface(self.interface) {
                warn!(
                    "Couldn't release interface {} on {}: {}",
                    self.interface, self.name, e
                );
            }
            drop(handle);
            debug!("Closed {} device handle", self.name);
        }

        if self.context.take().is_some() {
            debug!("Closed libusb context");
        }
    }
}

impl Drop for UsbControlTransport {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for UsbControlTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UsbControlTransport(name: {}, interface: {}, open: {})",
            self.name,
            self.interface,
            self.handle.is_some()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::lg::ultrafine;

    #[test]
    fn test_find_matching_without_devices() {
        let candidates: Vec<((u16, u16), &str)> = Vec::new();
        assert!(matches!(
            find_matching(candidates, &ultrafine::SPEC),
            Err(BrightnessError::DeviceNotFound {
                vendor_id: 0x043e,
                product_id: 0x9a40
            })
        ));
    }

    #[test]
    fn test_find_matching_ignores_other_devices() {
        let candidates = vec![
            ((0x043e, 0x9a63), "ultrafine 4k"),
            ((0x05ac, 0x9a40), "same product, other vendor"),
            ((0x1d6b, 0x0002), "root hub"),
        ];
        assert!(matches!(
            find_matching(candidates, &ultrafine::SPEC),
            Err(BrightnessError::DeviceNotFound { .. })
        ));
    }

    #[test]
    fn test_find_matching_picks_display() {
        let candidates = vec![
            ((0x1d6b, 0x0002), "root hub"),
            ((0x043e, 0x9a40), "ultrafine"),
            ((0x043e, 0x9a40), "second ultrafine"),
        ];
        assert_eq!(find_matching(candidates, &ultrafine::SPEC).unwrap(), "ultrafine");
    }
}
