// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the packet payload
(ANSI/VITA-49.0-2015 sections 5.2, 9).
*/

use crate::context::IfContext;
use crate::errors::VrtResult;
use crate::packet_header::Header;

/// Generic payload: either an opaque signal-data body or an IF context record.
///
/// Which variant is valid is determined entirely by the packet header's
/// [`Header::is_context_packet`], so this enum is never constructed directly
/// outside of [`IfContext`]/signal-data read/write round trips.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload<'a> {
    /// Signal data payload, an opaque view over the packet's sample words.
    SignalData(&'a [u32]),
    /// IF context payload.
    Context(IfContext<'a>),
}

impl<'a> Payload<'a> {
    /// Size of this payload in 32-bit words.
    pub fn words(&self) -> u32 {
        match self {
            Payload::SignalData(w) => w.len() as u32,
            Payload::Context(c) => c.words(),
        }
    }

    /// Validates the payload. Signal data carries no invariants of its own.
    pub fn validate(&self) -> VrtResult<()> {
        match self {
            Payload::SignalData(_) => Ok(()),
            Payload::Context(c) => c.validate(),
        }
    }

    /// Reads a payload of `payload_words` 32-bit words from `buf`, dispatching
    /// on whether `header` describes a context packet.
    pub fn read(
        buf: &'a [u32],
        header: &Header,
        payload_words: u32,
        validate: bool,
    ) -> VrtResult<(Payload<'a>, u32)> {
        if header.is_context_packet() {
            let (ctx, n) = IfContext::read(buf, validate)?;
            Ok((Payload::Context(ctx), n))
        } else {
            let words = payload_words as usize;
            let view = buf
                .get(..words)
                .ok_or(crate::errors::VrtError::BufSize)?;
            Ok((Payload::SignalData(view), words as u32))
        }
    }

    /// Writes this payload to `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        match self {
            Payload::SignalData(w) => {
                let words = w.len();
                if buf.len() < words {
                    return Err(crate::errors::VrtError::BufSize);
                }
                buf[..words].copy_from_slice(w);
                Ok(words as u32)
            }
            Payload::Context(c) => c.write(buf, validate),
        }
    }

    /// Gets a reference to the signal data payload.
    ///
    /// # Errors
    /// Returns an error if this payload is a context record.
    pub fn signal_data(&self) -> VrtResult<&'a [u32]> {
        match self {
            Payload::SignalData(w) => Ok(w),
            Payload::Context(_) => Err(crate::errors::VrtError::WrongPayloadKind),
        }
    }

    /// Gets a reference to the context payload.
    ///
    /// # Errors
    /// Returns an error if this payload is a signal-data record.
    pub fn context(&self) -> VrtResult<&IfContext<'a>> {
        match self {
            Payload::Context(c) => Ok(c),
            Payload::SignalData(_) => Err(crate::errors::VrtError::WrongPayloadKind),
        }
    }
}
