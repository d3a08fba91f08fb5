// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the device identifier context field
(ANSI/VITA-49.0-2015 section 9.10.1).
*/

use crate::bits::{extract, insert};
use crate::errors::{VrtError, VrtResult};
use core::fmt;

/// Device identifier: a manufacturer OUI plus a manufacturer-assigned device code.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId {
    /// Manufacturer organizationally unique identifier (24 bits).
    pub manufacturer_oui: u32,
    /// Manufacturer-assigned device code.
    pub device_code: u16,
}

impl DeviceId {
    /// Size of this field in 32-bit words. Always 2.
    pub fn words(&self) -> u32 {
        2
    }

    /// Validates that `manufacturer_oui` fits in its 24-bit field.
    pub fn validate(&self) -> VrtResult<()> {
        if self.manufacturer_oui > 0x00FF_FFFF {
            return Err(VrtError::Oui);
        }
        Ok(())
    }

    /// Reads a device identifier from the first two words of `buf`.
    pub fn read(buf: &[u32], validate: bool) -> VrtResult<(DeviceId, u32)> {
        if buf.len() < 2 {
            return Err(VrtError::BufSize);
        }
        let device_id = DeviceId {
            manufacturer_oui: extract(buf[0], 0, 24),
            device_code: extract(buf[1], 0, 16) as u16,
        };
        if validate {
            device_id.validate()?;
        }
        Ok((device_id, 2))
    }

    /// Writes this device identifier into the first two words of `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        if buf.len() < 2 {
            return Err(VrtError::BufSize);
        }
        buf[0] = insert(self.manufacturer_oui, 0, 24);
        buf[1] = insert(u32::from(self.device_code), 0, 16);
        Ok(2)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "oui {:#08x}, device code {}",
            self.manufacturer_oui, self.device_code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let d = DeviceId {
            manufacturer_oui: 0x00ABCDEF,
            device_code: 7,
        };
        let mut buf = [0u32; 2];
        d.write(&mut buf, true).unwrap();
        let (d2, n) = DeviceId::read(&buf, true).unwrap();
        assert_eq!(n, 2);
        assert_eq!(d, d2);
    }

    #[test]
    fn oui_overflow_rejected() {
        let d = DeviceId {
            manufacturer_oui: 0x0100_0000,
            ..Default::default()
        };
        let mut buf = [0u32; 2];
        assert_eq!(d.write(&mut buf, true), Err(VrtError::Oui));
    }
}
