// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
`vita49` is a crate for parsing and generating packets compatible with the
ANSI/VITA-49.0-2015 "VRT" radio transport protocol standard: signal data and
IF context packets, built word-by-word over `&[u32]` buffers with no
intermediate heap allocation for variable-length fields.
*/
#![deny(missing_docs)]
#![deny(unstable_features, unused_import_braces, unreachable_pub)]
#![warn(rustdoc::unescaped_backticks)]
#![forbid(unsafe_code)]

mod bits;
mod class_id;
mod context;
mod context_association_lists;
mod data_packet_payload_format;
mod device_id;
mod ecef_ephemeris;
mod errors;
mod fields;
mod formatted_gps;
mod gain;
mod gps_ascii;
mod packet_header;
mod payload;
mod trailer;
mod vrt;

// Public exports
pub use crate::class_id::ClassIdentifier;
pub use crate::context::{ContextIndicator, IfContext, StateAndEvent};
pub use crate::context_association_lists::ContextAssociationLists;
pub use crate::data_packet_payload_format::{
    DataItemFormat, DataPacketPayloadFormat, PackingMethod, RealOrComplex,
};
pub use crate::device_id::DeviceId;
pub use crate::ecef_ephemeris::Ephemeris;
pub use crate::errors::{VrtError, VrtResult};
pub use crate::fields::Fields;
pub use crate::formatted_gps::FormattedGeolocation;
pub use crate::gain::Gain;
pub use crate::gps_ascii::GpsAscii;
pub use crate::packet_header::{Header, PacketType, Tsf, Tsi};
pub use crate::payload::Payload;
pub use crate::trailer::{Indicator, Trailer};
pub use crate::vrt::Packet;

/// Standard imports for the most commonly used structures and traits in the
/// `vita49` crate.
pub mod prelude {
    pub use crate::class_id::ClassIdentifier;
    pub use crate::context::IfContext;
    pub use crate::errors::{VrtError, VrtResult};
    pub use crate::fields::Fields;
    pub use crate::packet_header::{Header, PacketType, Tsf, Tsi};
    pub use crate::payload::Payload;
    pub use crate::trailer::Trailer;
    pub use crate::vrt::Packet;
}
