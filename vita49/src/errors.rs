// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Error types/enumerations for the `vita49` crate.
*/

use thiserror::Error;

/// Errors that can be produced by validating, reading, or writing a VRT
/// packet section.
///
/// Each variant corresponds 1:1 to a negative error code in the original
/// ANSI/VITA 49.0 reference implementation's `vrt_error_code` enum.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrtError {
    /// The destination or source buffer is too small for this operation.
    #[error("buffer is too small for this operation")]
    BufSize,
    /// A reserved bit was set on read, or the caller tried to set one on write.
    #[error("a reserved bit was set")]
    Reserved,
    /// The packet type code is outside the defined codespace.
    #[error("packet type is invalid")]
    PacketType,
    /// A context packet declared a trailer, which the standard forbids.
    #[error("context packets cannot have a trailer")]
    Trailer,
    /// A non-context packet set the TSM bit, which is only meaningful on context packets.
    #[error("tsm is only meaningful on context packets")]
    Tsm,
    /// The TSI code is outside the defined codespace.
    #[error("tsi is invalid")]
    Tsi,
    /// The TSF code is outside the defined codespace.
    #[error("tsf is invalid")]
    Tsf,
    /// A TSF::RealTime fractional timestamp was >= 1e12 picoseconds.
    #[error("real-time fractional timestamp must be less than 1e12 picoseconds")]
    RealTime,
    /// The packet count exceeds the 4-bit field width (> 0x0F).
    #[error("packet count exceeds 4 bits")]
    PacketCount,
    /// An OUI exceeds the 24-bit field width (> 0x00FFFFFF).
    #[error("oui exceeds 24 bits")]
    Oui,
    /// The associated-context-packet-count exceeds the 7-bit field width (> 0x7F).
    #[error("associated context packet count exceeds 7 bits")]
    AssociatedContextPacketCount,
    /// Bandwidth was negative.
    #[error("bandwidth must be non-negative")]
    Bandwidth,
    /// Sample rate was negative.
    #[error("sample rate must be non-negative")]
    SampleRate,
    /// Temperature was below absolute zero (-273.15 C).
    #[error("temperature must be >= -273.15 C")]
    Temperature,
    /// The packing method code is outside the defined codespace.
    #[error("packing method is invalid")]
    PackingMethod,
    /// The real/complex code is outside the defined codespace.
    #[error("real_or_complex is invalid")]
    RealOrComplex,
    /// The data item format code is outside the defined codespace.
    #[error("data_item_format is invalid")]
    DataItemFormat,
    /// Event tag size exceeds 3 bits (> 0x07).
    #[error("event_tag_size exceeds 3 bits")]
    EventTagSize,
    /// Channel tag size exceeds 4 bits (> 0x0F).
    #[error("channel_tag_size exceeds 4 bits")]
    ChannelTagSize,
    /// Item packing field size exceeds 6 bits (> 0x3F).
    #[error("item_packing_field_size exceeds 6 bits")]
    ItemPackingFieldSize,
    /// Data item size exceeds 6 bits (> 0x3F).
    #[error("data_item_size exceeds 6 bits")]
    DataItemSize,
    /// The integer-seconds timestamp was not all-ones while tsi is None.
    #[error("integer second timestamp must be all-ones when tsi is none")]
    IntegerSecondTimestamp,
    /// The fractional-seconds timestamp was not all-ones while tsf is None.
    #[error("fractional second timestamp must be all-ones when tsf is none")]
    FractionalSecondTimestamp,
    /// Latitude outside [-90, 90] (and not the unspecified sentinel).
    #[error("latitude must be in [-90, 90]")]
    Latitude,
    /// Longitude outside [-180, 180] (and not the unspecified sentinel).
    #[error("longitude must be in [-180, 180]")]
    Longitude,
    /// Speed over ground is negative (and not the unspecified sentinel).
    #[error("speed_over_ground must be non-negative")]
    SpeedOverGround,
    /// Heading angle outside [0, 359.999999761582] (and not the unspecified sentinel).
    #[error("heading_angle must be in [0, 359.999999761582]")]
    HeadingAngle,
    /// Track angle outside [0, 359.999999761582] (and not the unspecified sentinel).
    #[error("track_angle must be in [0, 359.999999761582]")]
    TrackAngle,
    /// Magnetic variation outside [-180, 180] (and not the unspecified sentinel).
    #[error("magnetic_variation must be in [-180, 180]")]
    MagneticVariation,
    /// Source list size exceeds 9 bits (> 0x01FF).
    #[error("source_list_size exceeds 9 bits")]
    SourceListSize,
    /// System list size exceeds 9 bits (> 0x01FF).
    #[error("system_list_size exceeds 9 bits")]
    SystemListSize,
    /// Asynchronous channel list size exceeds 15 bits (> 0x7FFF).
    #[error("channel_list_size exceeds 15 bits")]
    ChannelListSize,
    /// `Payload::signal_data`/`Payload::context` called on the wrong variant.
    #[error("payload is not the requested kind")]
    WrongPayloadKind,
}

/// Result alias used throughout this crate.
pub type VrtResult<T> = Result<T, VrtError>;
