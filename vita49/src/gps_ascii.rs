// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the GPS ASCII context field
(ANSI/VITA-49.0-2015 section 9.4.7).
*/

use crate::bits::{extract, insert};
use crate::errors::{VrtError, VrtResult};

/// GPS ASCII: a manufacturer-identified formatted ASCII sentence, borrowed
/// from its source buffer rather than copied.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsAscii<'a> {
    /// Manufacturer organizationally unique identifier (24 bits).
    pub manufacturer_oui: u32,
    /// The ASCII sentence, as raw words (not necessarily NUL-terminated).
    pub ascii: &'a [u32],
}

impl<'a> GpsAscii<'a> {
    /// Size of this field in 32-bit words: 2 plus the ASCII word count.
    pub fn words(&self) -> u32 {
        2 + self.ascii.len() as u32
    }

    /// Validates that `manufacturer_oui` fits in its 24-bit field.
    pub fn validate(&self) -> VrtResult<()> {
        if self.manufacturer_oui > 0x00FF_FFFF {
            return Err(VrtError::Oui);
        }
        Ok(())
    }

    /// Reads a GPS ASCII field from the front of `buf`, borrowing the
    /// sentence words directly from `buf` rather than allocating.
    pub fn read(buf: &'a [u32], validate: bool) -> VrtResult<(GpsAscii<'a>, u32)> {
        if buf.len() < 2 {
            return Err(VrtError::BufSize);
        }
        let manufacturer_oui = extract(buf[0], 0, 24);
        let number_of_words = (buf[1] & 0x00FF_FFFF) as usize;
        let ascii = buf.get(2..2 + number_of_words).ok_or(VrtError::BufSize)?;
        let gps_ascii = GpsAscii {
            manufacturer_oui,
            ascii,
        };
        if validate {
            gps_ascii.validate()?;
        }
        Ok((gps_ascii, gps_ascii.words()))
    }

    /// Writes this GPS ASCII field to the front of `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        let words = self.words() as usize;
        if buf.len() < words {
            return Err(VrtError::BufSize);
        }
        buf[0] = insert(self.manufacturer_oui, 0, 24);
        buf[1] = self.ascii.len() as u32;
        buf[2..words].copy_from_slice(self.ascii);
        Ok(words as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let sentence = [0x4750_5341u32, 0x2C32_352Eu32];
        let g = GpsAscii {
            manufacturer_oui: 0x00ABCDEF,
            ascii: &sentence,
        };
        let mut buf = [0u32; 4];
        let n = g.write(&mut buf, true).unwrap();
        assert_eq!(n, 4);
        let (g2, n2) = GpsAscii::read(&buf, true).unwrap();
        assert_eq!(n2, 4);
        assert_eq!(g2.manufacturer_oui, g.manufacturer_oui);
        assert_eq!(g2.ascii, &sentence);
    }

    #[test]
    fn empty_sentence_round_trips() {
        let g = GpsAscii {
            manufacturer_oui: 0,
            ascii: &[],
        };
        let mut buf = [0u32; 2];
        let n = g.write(&mut buf, true).unwrap();
        assert_eq!(n, 2);
        let (g2, _) = GpsAscii::read(&buf, true).unwrap();
        assert!(g2.ascii.is_empty());
    }
}
