// SPDX-License-Identifier: GPL-3.0-only
//! LG display device specifications

pub mod ultrafine;

/// LG USB Vendor ID
pub const VENDOR_ID: u16 = 0x043e;
