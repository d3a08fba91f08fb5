// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the class identifier field
(ANSI/VITA-49.0-2015 section 5.1.3).
*/

use crate::bits::{extract, insert};
use crate::errors::{VrtError, VrtResult};

/// Class identifier: two 32-bit words naming the organizationally unique
/// identifier, information class code, and packet class code of a stream.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassIdentifier {
    /// Organizationally unique identifier (24 bits).
    pub oui: u32,
    /// Information class code.
    pub information_class_code: u16,
    /// Packet class code.
    pub packet_class_code: u16,
}

impl ClassIdentifier {
    /// Size of this section in 32-bit words. Always 2.
    pub fn words(&self) -> u32 {
        2
    }

    /// Validates that `oui` fits in its 24-bit field.
    pub fn validate(&self) -> VrtResult<()> {
        if self.oui > 0x00FF_FFFF {
            return Err(VrtError::Oui);
        }
        Ok(())
    }

    /// Reads a class identifier from the first two words of `buf`.
    pub fn read(buf: &[u32], validate: bool) -> VrtResult<(ClassIdentifier, u32)> {
        if buf.len() < 2 {
            return Err(VrtError::BufSize);
        }
        let class_id = ClassIdentifier {
            oui: extract(buf[0], 0, 24),
            information_class_code: extract(buf[1], 16, 16) as u16,
            packet_class_code: extract(buf[1], 0, 16) as u16,
        };
        if validate {
            class_id.validate()?;
        }
        Ok((class_id, 2))
    }

    /// Writes this class identifier into the first two words of `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        if buf.len() < 2 {
            return Err(VrtError::BufSize);
        }
        buf[0] = insert(self.oui, 0, 24);
        buf[1] = insert(u32::from(self.information_class_code), 16, 16)
            | insert(u32::from(self.packet_class_code), 0, 16);
        Ok(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let c = ClassIdentifier {
            oui: 0x00ABCDEF,
            information_class_code: 0x1234,
            packet_class_code: 0x5678,
        };
        let mut buf = [0u32; 2];
        c.write(&mut buf, true).unwrap();
        let (c2, n) = ClassIdentifier::read(&buf, true).unwrap();
        assert_eq!(n, 2);
        assert_eq!(c, c2);
    }

    #[test]
    fn oui_overflow_rejected() {
        let c = ClassIdentifier {
            oui: 0x0100_0000,
            ..Default::default()
        };
        let mut buf = [0u32; 2];
        assert_eq!(c.write(&mut buf, true), Err(VrtError::Oui));
    }
}
