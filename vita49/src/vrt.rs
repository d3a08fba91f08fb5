// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Primary module for parsing/generating VRT data. This should be the main
entrypoint for any users of this crate.
*/

use crate::errors::{VrtError, VrtResult};
use crate::fields::Fields;
use crate::packet_header::{Header, PacketType, Tsf, Tsi};
use crate::payload::Payload;
use crate::trailer::Trailer;

/// A complete VRT packet: header, prologue fields, payload, and optional
/// trailer.
///
/// Borrows its variable-length payload data (signal data words, GPS ASCII
/// sentences, context association lists) directly from the buffer it was
/// read from, rather than copying it.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet<'a> {
    /// Packet header.
    pub header: Header,
    /// Prologue fields (stream ID, class ID, timestamps).
    pub fields: Fields,
    /// Packet payload.
    pub payload: Payload<'a>,
    /// Trailer, present only on non-context packets when `header.has_trailer`.
    pub trailer: Option<Trailer>,
}

impl<'a> Packet<'a> {
    /// Produces a new signal-data packet with a stream identifier and an
    /// empty payload.
    pub fn new_signal_data_packet() -> Packet<'static> {
        Packet {
            header: Header {
                packet_type: PacketType::IfDataWithStreamId,
                ..Default::default()
            },
            fields: Fields {
                stream_id: Some(0),
                ..Default::default()
            },
            payload: Payload::SignalData(&[]),
            trailer: None,
        }
    }

    /// Produces a new IF context packet with a stream identifier and an
    /// empty context record.
    pub fn new_context_packet() -> Packet<'static> {
        Packet {
            header: Header {
                packet_type: PacketType::IfContext,
                ..Default::default()
            },
            fields: Fields {
                stream_id: Some(0),
                ..Default::default()
            },
            payload: Payload::Context(Default::default()),
            trailer: None,
        }
    }

    /// Size of this packet in 32-bit words, including the header.
    pub fn words(&self) -> u32 {
        let mut words = self.header.words();
        words += self.fields.words(&self.header);
        words += self.payload.words();
        if let Some(trailer) = &self.trailer {
            words += trailer.words();
        }
        words
    }

    /// Validates every section of this packet, plus the cross-section
    /// invariant that `header.packet_size` matches the packet's actual size.
    pub fn validate(&self) -> VrtResult<()> {
        self.header.validate()?;
        self.fields.validate(&self.header)?;
        self.payload.validate()?;
        if let Some(trailer) = &self.trailer {
            trailer.validate()?;
        }
        if self.header.has_trailer != self.trailer.is_some() {
            return Err(VrtError::Trailer);
        }
        if u32::from(self.header.packet_size) != self.words() {
            return Err(VrtError::BufSize);
        }
        Ok(())
    }

    /// Reads a complete packet from `buf`.
    pub fn read(buf: &'a [u32], validate: bool) -> VrtResult<(Packet<'a>, u32)> {
        let (header, mut offset) = Header::read(buf, validate)?;
        let (fields, n) = Fields::read(&buf[offset as usize..], &header, validate)?;
        offset += n;

        let payload_words = u32::from(header.packet_size)
            .saturating_sub(offset)
            .saturating_sub(if header.has_trailer { 1 } else { 0 });
        let (payload, n) = Payload::read(&buf[offset as usize..], &header, payload_words, validate)?;
        offset += n;

        let trailer = if header.has_trailer {
            let (trailer, n) = Trailer::read(&buf[offset as usize..], validate)?;
            offset += n;
            Some(trailer)
        } else {
            None
        };

        let packet = Packet {
            header,
            fields,
            payload,
            trailer,
        };
        if validate {
            packet.validate()?;
        }
        Ok((packet, offset))
    }

    /// Writes this packet to `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        let mut offset = self.header.write(buf, validate)?;
        offset += self.fields.write(&mut buf[offset as usize..], &self.header, validate)?;
        offset += self.payload.write(&mut buf[offset as usize..], validate)?;
        if let Some(trailer) = &self.trailer {
            offset += trailer.write(&mut buf[offset as usize..], validate)?;
        }
        Ok(offset)
    }

    /// Updates `header.packet_size` to reflect this packet's current contents.
    ///
    /// Call this after mutating `fields`/`payload`/`trailer` and before
    /// writing, since `write`/`validate` both check that `packet_size` is
    /// already accurate.
    pub fn update_packet_size(&mut self) {
        self.header.packet_size = self.words() as u16;
    }

    /// Sets the packet's stream ID, adjusting the packet type's
    /// with/without-stream-id bit to match.
    pub fn set_stream_id(&mut self, stream_id: Option<u32>) {
        self.fields.stream_id = stream_id;
        self.header.packet_type = match (self.header.packet_type, stream_id.is_some()) {
            (PacketType::IfDataWithoutStreamId, true) => PacketType::IfDataWithStreamId,
            (PacketType::IfDataWithStreamId, false) => PacketType::IfDataWithoutStreamId,
            (PacketType::ExtDataWithoutStreamId, true) => PacketType::ExtDataWithStreamId,
            (PacketType::ExtDataWithStreamId, false) => PacketType::ExtDataWithoutStreamId,
            (other, _) => other,
        };
    }

    /// Sets the integer-seconds timestamp and its governing [`Tsi`] mode together.
    pub fn set_integer_timestamp(&mut self, timestamp: Option<u32>, tsi: Tsi) {
        self.fields.integer_seconds_timestamp = timestamp;
        self.header.tsi = tsi;
    }

    /// Sets the fractional-seconds timestamp and its governing [`Tsf`] mode together.
    pub fn set_fractional_timestamp(&mut self, timestamp: Option<u64>, tsf: Tsf) {
        self.fields.fractional_seconds_timestamp = timestamp;
        self.header.tsf = tsf;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::IfContext;

    #[test]
    fn round_trip_signal_data_packet() {
        let samples = [1u32, 2, 3, 4];
        let mut packet = Packet::new_signal_data_packet();
        packet.set_stream_id(Some(0xDEAD_BEEF));
        packet.payload = Payload::SignalData(&samples);
        packet.update_packet_size();

        let mut buf = vec![0u32; packet.words() as usize];
        let n = packet.write(&mut buf, true).unwrap();
        let (packet2, n2) = Packet::read(&buf, true).unwrap();
        assert_eq!(n, n2);
        assert_eq!(packet2.fields.stream_id, Some(0xDEAD_BEEF));
        assert_eq!(packet2.payload.signal_data().unwrap(), &samples);
    }

    #[test]
    fn round_trip_context_packet_with_trailer_rejected() {
        let mut packet = Packet::new_context_packet();
        packet.trailer = Some(Trailer::default());
        packet.header.has_trailer = true;
        packet.update_packet_size();
        let mut buf = vec![0u32; packet.words() as usize];
        assert_eq!(packet.write(&mut buf, true), Err(VrtError::Trailer));
    }

    #[test]
    fn round_trip_context_packet() {
        let mut packet = Packet::new_context_packet();
        packet.payload = Payload::Context(IfContext {
            bandwidth: Some(2.4e9),
            ..Default::default()
        });
        packet.update_packet_size();
        let mut buf = vec![0u32; packet.words() as usize];
        packet.write(&mut buf, true).unwrap();
        let (packet2, _) = Packet::read(&buf, true).unwrap();
        assert_eq!(
            packet2.payload.context().unwrap().bandwidth,
            Some(2.4e9)
        );
    }

    #[test]
    fn packet_size_mismatch_rejected() {
        let mut packet = Packet::new_signal_data_packet();
        packet.header.packet_size = 99;
        let mut buf = vec![0u32; 16];
        assert_eq!(packet.write(&mut buf, true), Err(VrtError::BufSize));
    }
}
