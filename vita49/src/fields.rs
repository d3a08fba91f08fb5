// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the prologue fields that follow the
packet header: stream identifier, class identifier, and timestamps
(ANSI/VITA-49.0-2015 sections 5.1.2, 5.1.3, 5.1.4).
*/

use crate::bits::{read_u64_be, write_u64_be, SENTINEL_U32, SENTINEL_U64};
use crate::class_id::ClassIdentifier;
use crate::errors::{VrtError, VrtResult};
use crate::packet_header::{Header, Tsf, Tsi};

/// The prologue fields following the header word, whose presence and shape
/// are entirely driven by the packet's [`Header`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fields {
    /// Stream identifier, present when `header.has_stream_id()`.
    pub stream_id: Option<u32>,
    /// Class identifier, present when `header.has_class_id`.
    pub class_id: Option<ClassIdentifier>,
    /// Integer-seconds timestamp, present when `header.tsi != Tsi::None`.
    pub integer_seconds_timestamp: Option<u32>,
    /// Fractional-seconds timestamp, present when `header.tsf != Tsf::None`.
    pub fractional_seconds_timestamp: Option<u64>,
}

impl Fields {
    /// Size of this section in 32-bit words, given the governing `header`.
    pub fn words(&self, header: &Header) -> u32 {
        let mut words = 0;
        if header.has_stream_id() {
            words += 1;
        }
        if header.has_class_id {
            words += 2;
        }
        if header.tsi != Tsi::None {
            words += 1;
        }
        if header.tsf != Tsf::None {
            words += 2;
        }
        words
    }

    /// Validates the fields against the invariants `header` implies: a
    /// `Tsf::RealTime` fractional timestamp must be less than 1e12
    /// picoseconds, and an undefined `tsi`/`tsf` must carry the all-ones
    /// sentinel rather than an arbitrary value.
    pub fn validate(&self, header: &Header) -> VrtResult<()> {
        match (header.tsi, self.integer_seconds_timestamp) {
            (Tsi::None, Some(v)) if v != SENTINEL_U32 => {
                return Err(VrtError::IntegerSecondTimestamp)
            }
            _ => {}
        }
        match (header.tsf, self.fractional_seconds_timestamp) {
            (Tsf::None, Some(v)) if v != SENTINEL_U64 => {
                return Err(VrtError::FractionalSecondTimestamp)
            }
            (Tsf::RealTime, Some(v)) if v < SENTINEL_U64 && v >= 1_000_000_000_000 => {
                return Err(VrtError::RealTime)
            }
            _ => {}
        }
        if let Some(class_id) = self.class_id {
            class_id.validate()?;
        }
        Ok(())
    }

    /// Reads the fields described by `header` from the front of `buf`.
    pub fn read(buf: &[u32], header: &Header, validate: bool) -> VrtResult<(Fields, u32)> {
        let mut offset = 0usize;
        let mut fields = Fields::default();

        if header.has_stream_id() {
            let word = *buf.get(offset).ok_or(VrtError::BufSize)?;
            fields.stream_id = Some(word);
            offset += 1;
        }
        if header.has_class_id {
            let (class_id, n) = ClassIdentifier::read(&buf[offset..], validate)?;
            fields.class_id = Some(class_id);
            offset += n as usize;
        }
        if header.tsi != Tsi::None {
            let word = *buf.get(offset).ok_or(VrtError::BufSize)?;
            fields.integer_seconds_timestamp = Some(word);
            offset += 1;
        }
        if header.tsf != Tsf::None {
            let hi = *buf.get(offset).ok_or(VrtError::BufSize)?;
            let lo = *buf.get(offset + 1).ok_or(VrtError::BufSize)?;
            fields.fractional_seconds_timestamp = Some(read_u64_be([hi, lo]));
            offset += 2;
        }

        if validate {
            fields.validate(header)?;
        }
        Ok((fields, offset as u32))
    }

    /// Writes the fields described by `header` to the front of `buf`.
    pub fn write(&self, buf: &mut [u32], header: &Header, validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate(header)?;
        }
        let mut offset = 0usize;

        if header.has_stream_id() {
            let word = self.stream_id.ok_or(VrtError::BufSize)?;
            *buf.get_mut(offset).ok_or(VrtError::BufSize)? = word;
            offset += 1;
        }
        if header.has_class_id {
            let class_id = self.class_id.ok_or(VrtError::BufSize)?;
            let n = class_id.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }
        if header.tsi != Tsi::None {
            let word = self.integer_seconds_timestamp.unwrap_or(SENTINEL_U32);
            *buf.get_mut(offset).ok_or(VrtError::BufSize)? = word;
            offset += 1;
        }
        if header.tsf != Tsf::None {
            let value = self.fractional_seconds_timestamp.unwrap_or(SENTINEL_U64);
            let [hi, lo] = write_u64_be(value);
            *buf.get_mut(offset).ok_or(VrtError::BufSize)? = hi;
            *buf.get_mut(offset + 1).ok_or(VrtError::BufSize)? = lo;
            offset += 2;
        }

        Ok(offset as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_header::PacketType;

    #[test]
    fn round_trip_full_prologue() {
        let header = Header {
            packet_type: PacketType::IfDataWithStreamId,
            has_class_id: true,
            tsi: Tsi::Utc,
            tsf: Tsf::RealTime,
            ..Default::default()
        };
        let fields = Fields {
            stream_id: Some(0xDEAD_BEEF),
            class_id: Some(ClassIdentifier {
                oui: 0x00ABCDEF,
                information_class_code: 1,
                packet_class_code: 2,
            }),
            integer_seconds_timestamp: Some(123),
            fractional_seconds_timestamp: Some(456_789),
        };
        let mut buf = [0u32; 6];
        let n = fields.write(&mut buf, &header, true).unwrap();
        assert_eq!(n, fields.words(&header));
        let (fields2, n2) = Fields::read(&buf, &header, true).unwrap();
        assert_eq!(n, n2);
        assert_eq!(fields, fields2);
    }

    #[test]
    fn undefined_timestamps_write_sentinels() {
        let header = Header {
            tsi: Tsi::Utc,
            tsf: Tsf::RealTime,
            ..Default::default()
        };
        let fields = Fields::default();
        let mut buf = [0u32; 3];
        fields.write(&mut buf, &header, true).unwrap();
        assert_eq!(buf[0], SENTINEL_U32);
        assert_eq!(read_u64_be([buf[1], buf[2]]), SENTINEL_U64);
    }

    #[test]
    fn real_time_fractional_overflow_rejected() {
        let header = Header {
            tsf: Tsf::RealTime,
            ..Default::default()
        };
        let fields = Fields {
            fractional_seconds_timestamp: Some(1_000_000_000_000),
            ..Default::default()
        };
        let mut buf = [0u32; 2];
        assert_eq!(fields.write(&mut buf, &header, true), Err(VrtError::RealTime));
    }
}
