// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the data packet payload format
context field (ANSI/VITA-49.0-2015 section 9.13.3).
*/

use crate::bits::{extract, insert};
use crate::errors::{VrtError, VrtResult};

/// Packing method: how multiple data samples are packed into payload words.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackingMethod {
    /// Each sample starts at a host-word boundary.
    #[default]
    ProcessingEfficient,
    /// Samples are packed with no padding between them.
    LinkEfficient,
}

/// Real/complex sample type codespace.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RealOrComplex {
    /// Real samples.
    #[default]
    Real = 0,
    /// Complex samples, Cartesian (I/Q) representation.
    ComplexCartesian = 1,
    /// Complex samples, polar (magnitude/phase) representation.
    ComplexPolar = 2,
    /// The one reserved 2-bit code, preserved verbatim for non-validating
    /// reads rather than rejected.
    Reserved(u8),
}

impl TryFrom<u32> for RealOrComplex {
    type Error = VrtError;

    fn try_from(value: u32) -> VrtResult<Self> {
        match value {
            0 => Ok(RealOrComplex::Real),
            1 => Ok(RealOrComplex::ComplexCartesian),
            2 => Ok(RealOrComplex::ComplexPolar),
            _ => Err(VrtError::RealOrComplex),
        }
    }
}

impl RealOrComplex {
    fn from_bits_lenient(value: u32) -> RealOrComplex {
        RealOrComplex::try_from(value).unwrap_or(RealOrComplex::Reserved(value as u8))
    }

    fn code(self) -> u32 {
        match self {
            RealOrComplex::Real => 0,
            RealOrComplex::ComplexCartesian => 1,
            RealOrComplex::ComplexPolar => 2,
            RealOrComplex::Reserved(code) => u32::from(code),
        }
    }
}

/// Data item format codespace (ANSI/VITA-49.0-2015 Table 9.13.3-1).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataItemFormat {
    /// Signed fixed-point.
    #[default]
    SignedFixedPoint = 0,
    /// Signed VRT, 1-bit exponent.
    SignedVrt1BitExponent = 1,
    /// Signed VRT, 2-bit exponent.
    SignedVrt2BitExponent = 2,
    /// Signed VRT, 3-bit exponent.
    SignedVrt3BitExponent = 3,
    /// Signed VRT, 4-bit exponent.
    SignedVrt4BitExponent = 4,
    /// Signed VRT, 5-bit exponent.
    SignedVrt5BitExponent = 5,
    /// Signed VRT, 6-bit exponent.
    SignedVrt6BitExponent = 6,
    /// IEEE 754 single-precision floating point.
    Ieee754SinglePrecisionFloatingPoint = 14,
    /// IEEE 754 double-precision floating point.
    Ieee754DoublePrecisionFloatingPoint = 15,
    /// Unsigned fixed-point.
    UnsignedFixedPoint = 16,
    /// Unsigned VRT, 1-bit exponent.
    UnsignedVrt1BitExponent = 17,
    /// Unsigned VRT, 2-bit exponent.
    UnsignedVrt2BitExponent = 18,
    /// Unsigned VRT, 3-bit exponent.
    UnsignedVrt3BitExponent = 19,
    /// Unsigned VRT, 4-bit exponent.
    UnsignedVrt4BitExponent = 20,
    /// Unsigned VRT, 5-bit exponent.
    UnsignedVrt5BitExponent = 21,
    /// Unsigned VRT, 6-bit exponent.
    UnsignedVrt6BitExponent = 22,
    /// A 5-bit code outside `[0x00..=0x06]`/`[0x0E..=0x16]`, preserved
    /// verbatim for non-validating reads rather than rejected.
    Reserved(u8),
}

impl TryFrom<u32> for DataItemFormat {
    type Error = VrtError;

    fn try_from(value: u32) -> VrtResult<Self> {
        match value {
            0 => Ok(DataItemFormat::SignedFixedPoint),
            1 => Ok(DataItemFormat::SignedVrt1BitExponent),
            2 => Ok(DataItemFormat::SignedVrt2BitExponent),
            3 => Ok(DataItemFormat::SignedVrt3BitExponent),
            4 => Ok(DataItemFormat::SignedVrt4BitExponent),
            5 => Ok(DataItemFormat::SignedVrt5BitExponent),
            6 => Ok(DataItemFormat::SignedVrt6BitExponent),
            14 => Ok(DataItemFormat::Ieee754SinglePrecisionFloatingPoint),
            15 => Ok(DataItemFormat::Ieee754DoublePrecisionFloatingPoint),
            16 => Ok(DataItemFormat::UnsignedFixedPoint),
            17 => Ok(DataItemFormat::UnsignedVrt1BitExponent),
            18 => Ok(DataItemFormat::UnsignedVrt2BitExponent),
            19 => Ok(DataItemFormat::UnsignedVrt3BitExponent),
            20 => Ok(DataItemFormat::UnsignedVrt4BitExponent),
            21 => Ok(DataItemFormat::UnsignedVrt5BitExponent),
            22 => Ok(DataItemFormat::UnsignedVrt6BitExponent),
            _ => Err(VrtError::DataItemFormat),
        }
    }
}

impl DataItemFormat {
    fn from_bits_lenient(value: u32) -> DataItemFormat {
        DataItemFormat::try_from(value).unwrap_or(DataItemFormat::Reserved(value as u8))
    }

    fn code(self) -> u32 {
        match self {
            DataItemFormat::SignedFixedPoint => 0,
            DataItemFormat::SignedVrt1BitExponent => 1,
            DataItemFormat::SignedVrt2BitExponent => 2,
            DataItemFormat::SignedVrt3BitExponent => 3,
            DataItemFormat::SignedVrt4BitExponent => 4,
            DataItemFormat::SignedVrt5BitExponent => 5,
            DataItemFormat::SignedVrt6BitExponent => 6,
            DataItemFormat::Ieee754SinglePrecisionFloatingPoint => 14,
            DataItemFormat::Ieee754DoublePrecisionFloatingPoint => 15,
            DataItemFormat::UnsignedFixedPoint => 16,
            DataItemFormat::UnsignedVrt1BitExponent => 17,
            DataItemFormat::UnsignedVrt2BitExponent => 18,
            DataItemFormat::UnsignedVrt3BitExponent => 19,
            DataItemFormat::UnsignedVrt4BitExponent => 20,
            DataItemFormat::UnsignedVrt5BitExponent => 21,
            DataItemFormat::UnsignedVrt6BitExponent => 22,
            DataItemFormat::Reserved(code) => u32::from(code),
        }
    }
}

/// Data packet payload format: describes how samples are packed into the
/// signal data payload this context stream governs.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPacketPayloadFormat {
    /// Packing method.
    pub packing_method: PackingMethod,
    /// Real/complex sample type.
    pub real_or_complex: RealOrComplex,
    /// Data item format.
    pub data_item_format: DataItemFormat,
    /// Whether the sample-component repeat count is active.
    pub sample_component_repeat: bool,
    /// Event tag size, in bits (3-bit field, 0-7).
    pub event_tag_size: u8,
    /// Channel tag size, in bits (4-bit field, 0-15).
    pub channel_tag_size: u8,
    /// Size of one packed item, in bits minus one (6-bit field, 0-63).
    pub item_packing_field_size: u8,
    /// Size of one data item, in bits minus one (6-bit field, 0-63).
    pub data_item_size: u8,
    /// Sample-component repeat count minus one.
    pub repeat_count: u16,
    /// Vector size minus one.
    pub vector_size: u16,
}

impl DataPacketPayloadFormat {
    /// Size of this field in 32-bit words. Always 2.
    pub fn words(&self) -> u32 {
        2
    }

    /// Validates the 3/4/6/6-bit field widths, plus that `real_or_complex`/
    /// `data_item_format` don't carry a reserved code (a write of an
    /// in-memory value can set either to `Reserved` directly; a non-validating
    /// read can also produce one).
    pub fn validate(&self) -> VrtResult<()> {
        if matches!(self.real_or_complex, RealOrComplex::Reserved(_)) {
            return Err(VrtError::RealOrComplex);
        }
        if matches!(self.data_item_format, DataItemFormat::Reserved(_)) {
            return Err(VrtError::DataItemFormat);
        }
        if self.event_tag_size > 0x07 {
            return Err(VrtError::EventTagSize);
        }
        if self.channel_tag_size > 0x0F {
            return Err(VrtError::ChannelTagSize);
        }
        if self.item_packing_field_size > 0x3F {
            return Err(VrtError::ItemPackingFieldSize);
        }
        if self.data_item_size > 0x3F {
            return Err(VrtError::DataItemSize);
        }
        Ok(())
    }

    /// Reads a data packet payload format field from the first two words of `buf`.
    pub fn read(buf: &[u32], validate: bool) -> VrtResult<(DataPacketPayloadFormat, u32)> {
        if buf.len() < 2 {
            return Err(VrtError::BufSize);
        }
        let w0 = buf[0];
        let w1 = buf[1];
        let (real_or_complex, data_item_format) = if validate {
            (
                RealOrComplex::try_from(extract(w0, 29, 2))?,
                DataItemFormat::try_from(extract(w0, 24, 5))?,
            )
        } else {
            (
                RealOrComplex::from_bits_lenient(extract(w0, 29, 2)),
                DataItemFormat::from_bits_lenient(extract(w0, 24, 5)),
            )
        };
        let format = DataPacketPayloadFormat {
            packing_method: if extract(w0, 31, 1) != 0 {
                PackingMethod::LinkEfficient
            } else {
                PackingMethod::ProcessingEfficient
            },
            real_or_complex,
            data_item_format,
            sample_component_repeat: extract(w0, 23, 1) != 0,
            event_tag_size: extract(w0, 20, 3) as u8,
            channel_tag_size: extract(w0, 16, 4) as u8,
            item_packing_field_size: extract(w0, 6, 6) as u8,
            data_item_size: extract(w0, 0, 6) as u8,
            repeat_count: extract(w1, 16, 16) as u16,
            vector_size: extract(w1, 0, 16) as u16,
        };
        if validate {
            format.validate()?;
        }
        Ok((format, 2))
    }

    /// Writes this data packet payload format field into the first two words of `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        if buf.len() < 2 {
            return Err(VrtError::BufSize);
        }
        let packing_method = matches!(self.packing_method, PackingMethod::LinkEfficient) as u32;
        buf[0] = insert(packing_method, 31, 1)
            | insert(self.real_or_complex.code(), 29, 2)
            | insert(self.data_item_format.code(), 24, 5)
            | insert(self.sample_component_repeat as u32, 23, 1)
            | insert(u32::from(self.event_tag_size), 20, 3)
            | insert(u32::from(self.channel_tag_size), 16, 4)
            | insert(u32::from(self.item_packing_field_size), 6, 6)
            | insert(u32::from(self.data_item_size), 0, 6);
        buf[1] = insert(u32::from(self.repeat_count), 16, 16)
            | insert(u32::from(self.vector_size), 0, 16);
        Ok(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let f = DataPacketPayloadFormat {
            packing_method: PackingMethod::LinkEfficient,
            real_or_complex: RealOrComplex::ComplexCartesian,
            data_item_format: DataItemFormat::Ieee754SinglePrecisionFloatingPoint,
            sample_component_repeat: true,
            event_tag_size: 3,
            channel_tag_size: 7,
            item_packing_field_size: 31,
            data_item_size: 15,
            repeat_count: 2,
            vector_size: 1024,
        };
        let mut buf = [0u32; 2];
        f.write(&mut buf, true).unwrap();
        let (f2, n) = DataPacketPayloadFormat::read(&buf, true).unwrap();
        assert_eq!(n, 2);
        assert_eq!(f, f2);
    }

    #[test]
    fn reserved_data_item_format_rejected() {
        let mut buf = [0u32; 2];
        buf[0] = insert(7, 24, 5);
        assert_eq!(
            DataPacketPayloadFormat::read(&buf, true),
            Err(VrtError::DataItemFormat)
        );
    }

    #[test]
    fn reserved_codes_accepted_and_preserved_when_not_validating() {
        let mut buf = [0u32; 2];
        buf[0] = insert(3, 29, 2) | insert(7, 24, 5);
        let (f, n) = DataPacketPayloadFormat::read(&buf, false).unwrap();
        assert_eq!(n, 2);
        assert_eq!(f.real_or_complex, RealOrComplex::Reserved(3));
        assert_eq!(f.data_item_format, DataItemFormat::Reserved(7));
        assert_eq!(f.validate(), Err(VrtError::RealOrComplex));

        let mut out = [0u32; 2];
        f.write(&mut out, false).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn data_item_format_codespace_boundary() {
        assert_eq!(DataItemFormat::try_from(0x0D), Err(VrtError::DataItemFormat));
        assert_eq!(
            DataItemFormat::try_from(0x0E),
            Ok(DataItemFormat::Ieee754SinglePrecisionFloatingPoint)
        );
        assert_eq!(
            DataItemFormat::try_from(0x16),
            Ok(DataItemFormat::UnsignedVrt6BitExponent)
        );
        assert_eq!(DataItemFormat::try_from(0x17), Err(VrtError::DataItemFormat));
    }

    #[test]
    fn event_tag_size_overflow_rejected() {
        let f = DataPacketPayloadFormat {
            event_tag_size: 0x08,
            ..Default::default()
        };
        let mut buf = [0u32; 2];
        assert_eq!(f.write(&mut buf, true), Err(VrtError::EventTagSize));
    }
}
