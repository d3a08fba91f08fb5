// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the trailer field
(ANSI/VITA-49.0-2015 section 5.1.6).
*/

use crate::bits::{b2u, extract, insert, u2b};
use crate::errors::{VrtError, VrtResult};

/// One independent presence/value indicator bit pair in the trailer word.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indicator(pub Option<bool>);

impl Indicator {
    fn read(word: u32, enable_bit: u32, value_bit: u32) -> Indicator {
        if extract(word, enable_bit, 1) != 0 {
            Indicator(Some(u2b(extract(word, value_bit, 1))))
        } else {
            Indicator(None)
        }
    }

    fn write(self, enable_bit: u32, value_bit: u32) -> u32 {
        match self.0 {
            Some(v) => insert(1, enable_bit, 1) | insert(b2u(v), value_bit, 1),
            None => 0,
        }
    }
}

/// Trailer: twelve independent optional indicator bits plus an optional
/// associated-context-packet-count field.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trailer {
    /// Calibrated time indicator.
    pub calibrated_time: Indicator,
    /// Valid data indicator.
    pub valid_data: Indicator,
    /// Reference lock indicator.
    pub reference_lock: Indicator,
    /// AGC/MGC indicator (true = AGC, false = MGC).
    pub agc_or_mgc: Indicator,
    /// Detected signal indicator.
    pub detected_signal: Indicator,
    /// Spectral inversion indicator.
    pub spectral_inversion: Indicator,
    /// Over-range indicator.
    pub over_range: Indicator,
    /// Sample loss indicator.
    pub sample_loss: Indicator,
    /// User-defined indicator bit 11.
    pub user_defined_11: Indicator,
    /// User-defined indicator bit 10.
    pub user_defined_10: Indicator,
    /// User-defined indicator bit 9.
    pub user_defined_9: Indicator,
    /// User-defined indicator bit 8.
    pub user_defined_8: Indicator,
    /// Number of context packets associated with this data packet (0-127).
    pub associated_context_packet_count: Option<u8>,
}

impl Trailer {
    /// Size of this section in 32-bit words. Always 1.
    pub fn words(&self) -> u32 {
        1
    }

    /// Validates that `associated_context_packet_count`, if present, fits in
    /// its 7-bit field.
    pub fn validate(&self) -> VrtResult<()> {
        if let Some(count) = self.associated_context_packet_count {
            if count > 0x7F {
                return Err(VrtError::AssociatedContextPacketCount);
            }
        }
        Ok(())
    }

    /// Reads a trailer from the first word of `buf`.
    pub fn read(buf: &[u32], validate: bool) -> VrtResult<(Trailer, u32)> {
        if buf.is_empty() {
            return Err(VrtError::BufSize);
        }
        let word = buf[0];
        let associated_context_packet_count = if extract(word, 7, 1) != 0 {
            Some(extract(word, 0, 7) as u8)
        } else {
            None
        };
        let trailer = Trailer {
            calibrated_time: Indicator::read(word, 31, 19),
            valid_data: Indicator::read(word, 30, 18),
            reference_lock: Indicator::read(word, 29, 17),
            agc_or_mgc: Indicator::read(word, 28, 16),
            detected_signal: Indicator::read(word, 27, 15),
            spectral_inversion: Indicator::read(word, 26, 14),
            over_range: Indicator::read(word, 25, 13),
            sample_loss: Indicator::read(word, 24, 12),
            user_defined_11: Indicator::read(word, 23, 11),
            user_defined_10: Indicator::read(word, 22, 10),
            user_defined_9: Indicator::read(word, 21, 9),
            user_defined_8: Indicator::read(word, 20, 8),
            associated_context_packet_count,
        };
        if validate {
            trailer.validate()?;
        }
        Ok((trailer, 1))
    }

    /// Writes this trailer into the first word of `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        if buf.is_empty() {
            return Err(VrtError::BufSize);
        }
        let mut word = 0u32;
        word |= self.calibrated_time.write(31, 19);
        word |= self.valid_data.write(30, 18);
        word |= self.reference_lock.write(29, 17);
        word |= self.agc_or_mgc.write(28, 16);
        word |= self.detected_signal.write(27, 15);
        word |= self.spectral_inversion.write(26, 14);
        word |= self.over_range.write(25, 13);
        word |= self.sample_loss.write(24, 12);
        word |= self.user_defined_11.write(23, 11);
        word |= self.user_defined_10.write(22, 10);
        word |= self.user_defined_9.write(21, 9);
        word |= self.user_defined_8.write(20, 8);
        if let Some(count) = self.associated_context_packet_count {
            if count > 0x7F {
                return Err(VrtError::AssociatedContextPacketCount);
            }
            word |= insert(1, 7, 1) | insert(u32::from(count), 0, 7);
        }
        buf[0] = word;
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_fields_set() {
        let t = Trailer {
            calibrated_time: Indicator(Some(true)),
            valid_data: Indicator(Some(false)),
            reference_lock: Indicator(Some(true)),
            agc_or_mgc: Indicator(Some(true)),
            detected_signal: Indicator(Some(false)),
            spectral_inversion: Indicator(Some(true)),
            over_range: Indicator(Some(false)),
            sample_loss: Indicator(Some(true)),
            user_defined_11: Indicator(Some(true)),
            user_defined_10: Indicator(Some(false)),
            user_defined_9: Indicator(Some(true)),
            user_defined_8: Indicator(Some(false)),
            associated_context_packet_count: Some(42),
        };
        let mut buf = [0u32; 1];
        t.write(&mut buf, true).unwrap();
        let (t2, n) = Trailer::read(&buf, true).unwrap();
        assert_eq!(n, 1);
        assert_eq!(t, t2);
    }

    #[test]
    fn empty_trailer_is_all_zero_word() {
        let t = Trailer::default();
        let mut buf = [0xFFFF_FFFFu32; 1];
        t.write(&mut buf, true).unwrap();
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn associated_context_packet_count_overflow_rejected() {
        let t = Trailer {
            associated_context_packet_count: Some(0x80),
            ..Default::default()
        };
        let mut buf = [0u32; 1];
        assert_eq!(
            t.write(&mut buf, true),
            Err(VrtError::AssociatedContextPacketCount)
        );
    }
}
