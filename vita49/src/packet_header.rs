// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the packet header
(ANSI/VITA-49.0-2015 section 5.1.1).
*/

use crate::bits::{extract, insert};
use crate::errors::{VrtError, VrtResult};

/// Packet type codespace (header bits 31-28).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketType {
    /// IF data packet without a stream identifier.
    IfDataWithoutStreamId = 0x0,
    /// IF data packet with a stream identifier.
    IfDataWithStreamId = 0x1,
    /// Extension data packet without a stream identifier.
    ExtDataWithoutStreamId = 0x2,
    /// Extension data packet with a stream identifier.
    ExtDataWithStreamId = 0x3,
    /// IF context packet.
    IfContext = 0x4,
    /// Extension context packet.
    ExtContext = 0x5,
    /// A 4-bit code outside the six assigned values, preserved verbatim for
    /// non-validating reads rather than rejected.
    Reserved(u8),
}

impl TryFrom<u32> for PacketType {
    type Error = VrtError;

    fn try_from(value: u32) -> VrtResult<Self> {
        match value {
            0x0 => Ok(PacketType::IfDataWithoutStreamId),
            0x1 => Ok(PacketType::IfDataWithStreamId),
            0x2 => Ok(PacketType::ExtDataWithoutStreamId),
            0x3 => Ok(PacketType::ExtDataWithStreamId),
            0x4 => Ok(PacketType::IfContext),
            0x5 => Ok(PacketType::ExtContext),
            _ => Err(VrtError::PacketType),
        }
    }
}

impl PacketType {
    /// Parses a 4-bit packet type code without rejecting reserved values,
    /// for use by a non-validating [`Header::read`].
    fn from_bits_lenient(value: u32) -> PacketType {
        PacketType::try_from(value).unwrap_or(PacketType::Reserved(value as u8))
    }

    /// The 4-bit wire code for this packet type.
    fn code(self) -> u32 {
        match self {
            PacketType::IfDataWithoutStreamId => 0x0,
            PacketType::IfDataWithStreamId => 0x1,
            PacketType::ExtDataWithoutStreamId => 0x2,
            PacketType::ExtDataWithStreamId => 0x3,
            PacketType::IfContext => 0x4,
            PacketType::ExtContext => 0x5,
            PacketType::Reserved(code) => u32::from(code),
        }
    }

    fn has_stream_id(self) -> bool {
        !matches!(self, PacketType::IfDataWithoutStreamId | PacketType::ExtDataWithoutStreamId)
    }

    fn is_context(self) -> bool {
        matches!(self, PacketType::IfContext | PacketType::ExtContext)
    }
}

/// Integer-seconds timestamp (TSI) codespace (header bits 23-22).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tsi {
    /// No integer-seconds timestamp field is present.
    #[default]
    None = 0x0,
    /// UTC time.
    Utc = 0x1,
    /// GPS time.
    Gps = 0x2,
    /// Other, user-defined meaning.
    Other = 0x3,
}

impl TryFrom<u32> for Tsi {
    type Error = VrtError;

    fn try_from(value: u32) -> VrtResult<Self> {
        match value {
            0x0 => Ok(Tsi::None),
            0x1 => Ok(Tsi::Utc),
            0x2 => Ok(Tsi::Gps),
            0x3 => Ok(Tsi::Other),
            _ => Err(VrtError::Tsi),
        }
    }
}

/// Fractional-seconds timestamp (TSF) codespace (header bits 21-20).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tsf {
    /// No fractional-seconds timestamp field is present.
    #[default]
    None = 0x0,
    /// Sample count.
    SampleCount = 0x1,
    /// Real time (picoseconds).
    RealTime = 0x2,
    /// Free-running count.
    FreeRunningCount = 0x3,
}

impl TryFrom<u32> for Tsf {
    type Error = VrtError;

    fn try_from(value: u32) -> VrtResult<Self> {
        match value {
            0x0 => Ok(Tsf::None),
            0x1 => Ok(Tsf::SampleCount),
            0x2 => Ok(Tsf::RealTime),
            0x3 => Ok(Tsf::FreeRunningCount),
            _ => Err(VrtError::Tsf),
        }
    }
}

/// One 32-bit VRT packet header word.
///
/// Bit layout (MSB to LSB): `packet_type`@31:28, `has_class_id`@27, `has_trailer`@26,
/// reserved@25, `tsm`@24, `tsi`@23:22, `tsf`@21:20, `packet_count`@19:16, `packet_size`@15:0.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Packet type.
    pub packet_type: PacketType,
    /// Whether a class identifier field is present.
    pub has_class_id: bool,
    /// Whether a trailer is present. Context packets must not set this.
    pub has_trailer: bool,
    /// Context field change indicator. Only meaningful on context packets.
    pub tsm: bool,
    /// Integer-seconds timestamp kind.
    pub tsi: Tsi,
    /// Fractional-seconds timestamp kind.
    pub tsf: Tsf,
    /// Packet count, a 4-bit modulo-16 sequence number.
    pub packet_count: u8,
    /// Total packet size in 32-bit words, including this header word.
    pub packet_size: u16,
}

impl Default for Header {
    fn default() -> Self {
        Header {
            packet_type: PacketType::IfDataWithoutStreamId,
            has_class_id: false,
            has_trailer: false,
            tsm: false,
            tsi: Tsi::None,
            tsf: Tsf::None,
            packet_count: 0,
            packet_size: 1,
        }
    }
}

impl Header {
    /// Size of this section in 32-bit words. Always 1.
    pub fn words(&self) -> u32 {
        1
    }

    /// Returns whether this packet's fields include a stream identifier word.
    pub fn has_stream_id(&self) -> bool {
        self.packet_type.has_stream_id()
    }

    /// Returns whether this header describes a context (or extension context) packet.
    pub fn is_context_packet(&self) -> bool {
        self.packet_type.is_context()
    }

    /// Validates the invariants that are not already enforced by the type system:
    /// context packets cannot carry a trailer, and `tsm` is only meaningful on
    /// context packets.
    pub fn validate(&self) -> VrtResult<()> {
        if matches!(self.packet_type, PacketType::Reserved(_)) {
            return Err(VrtError::PacketType);
        }
        if self.is_context_packet() && self.has_trailer {
            return Err(VrtError::Trailer);
        }
        if self.tsm && !self.is_context_packet() {
            return Err(VrtError::Tsm);
        }
        if self.packet_count > 0x0F {
            return Err(VrtError::PacketCount);
        }
        Ok(())
    }

    /// Reads a header from the first word of `buf`, returning the header and
    /// the number of words consumed (always 1). If `validate` is `true`, the
    /// invariants checked by [`Header::validate`] are enforced.
    pub fn read(buf: &[u32], validate: bool) -> VrtResult<(Header, u32)> {
        if buf.is_empty() {
            return Err(VrtError::BufSize);
        }
        let word = buf[0];
        let packet_type = if validate {
            PacketType::try_from(extract(word, 28, 4))?
        } else {
            PacketType::from_bits_lenient(extract(word, 28, 4))
        };
        let has_class_id = extract(word, 27, 1) != 0;
        let has_trailer = extract(word, 26, 1) != 0;
        if validate && extract(word, 25, 1) != 0 {
            return Err(VrtError::Reserved);
        }
        let tsm = extract(word, 24, 1) != 0;
        let tsi = Tsi::try_from(extract(word, 22, 2))?;
        let tsf = Tsf::try_from(extract(word, 20, 2))?;
        let packet_count = extract(word, 16, 4) as u8;
        let packet_size = extract(word, 0, 16) as u16;

        let header = Header {
            packet_type,
            has_class_id,
            has_trailer,
            tsm,
            tsi,
            tsf,
            packet_count,
            packet_size,
        };
        if validate {
            header.validate()?;
        }
        Ok((header, 1))
    }

    /// Writes this header into the first word of `buf`, returning the number
    /// of words written (always 1). If `validate` is `true`, the invariants
    /// checked by [`Header::validate`] are enforced before writing.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        if buf.is_empty() {
            return Err(VrtError::BufSize);
        }
        if self.packet_count > 0x0F {
            return Err(VrtError::PacketCount);
        }
        let mut word = 0u32;
        word |= insert(self.packet_type.code(), 28, 4);
        word |= insert(self.has_class_id as u32, 27, 1);
        word |= insert(self.has_trailer as u32, 26, 1);
        word |= insert(self.tsm as u32, 24, 1);
        word |= insert(self.tsi as u32, 22, 2);
        word |= insert(self.tsf as u32, 20, 2);
        word |= insert(u32::from(self.packet_count), 16, 4);
        word |= insert(u32::from(self.packet_size), 0, 16);
        buf[0] = word;
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_signal_data_header() {
        let h = Header {
            packet_type: PacketType::IfDataWithStreamId,
            has_class_id: true,
            has_trailer: true,
            tsm: false,
            tsi: Tsi::Utc,
            tsf: Tsf::RealTime,
            packet_count: 7,
            packet_size: 42,
        };
        let mut buf = [0u32; 1];
        h.write(&mut buf, true).unwrap();
        let (h2, n) = Header::read(&buf, true).unwrap();
        assert_eq!(n, 1);
        assert_eq!(h, h2);
    }

    #[test]
    fn context_packet_rejects_trailer() {
        let h = Header {
            packet_type: PacketType::IfContext,
            has_trailer: true,
            ..Default::default()
        };
        let mut buf = [0u32; 1];
        assert_eq!(h.write(&mut buf, true), Err(VrtError::Trailer));
    }

    #[test]
    fn tsm_rejected_on_non_context_packet() {
        let h = Header {
            packet_type: PacketType::IfDataWithoutStreamId,
            tsm: true,
            ..Default::default()
        };
        let mut buf = [0u32; 1];
        assert_eq!(h.write(&mut buf, true), Err(VrtError::Tsm));
    }

    #[test]
    fn reserved_bit_rejected_on_read() {
        let buf = [1u32 << 25];
        assert_eq!(Header::read(&buf, true), Err(VrtError::Reserved));
        assert!(Header::read(&buf, false).is_ok());
    }

    #[test]
    fn packet_count_overflow_rejected() {
        let h = Header {
            packet_count: 0x10,
            ..Default::default()
        };
        let mut buf = [0u32; 1];
        assert_eq!(h.write(&mut buf, true), Err(VrtError::PacketCount));
    }

    #[test]
    fn reserved_packet_type_rejected_when_validating() {
        let buf = [insert(0x9, 28, 4)];
        assert_eq!(Header::read(&buf, true), Err(VrtError::PacketType));
    }

    #[test]
    fn reserved_packet_type_accepted_and_preserved_when_not_validating() {
        let buf = [insert(0x9, 28, 4)];
        let (h, n) = Header::read(&buf, false).unwrap();
        assert_eq!(n, 1);
        assert_eq!(h.packet_type, PacketType::Reserved(0x9));

        let mut out = [0u32; 1];
        h.write(&mut out, false).unwrap();
        assert_eq!(out, buf);
    }
}
