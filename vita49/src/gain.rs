// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the gain context field
(ANSI/VITA-49.0-2015 section 9.5.3).

In RF equipment such as tuners and receivers, the total gain of the
equipment is typically distributed to allow tradeoffs between noise power
and linearity. For such equipment, stage 1 gain conveys the front-end or
RF gain, and stage 2 gain conveys the back-end or IF gain. For equipment
that does not require gain distribution, stage 1 gain provides the gain
of the device, and stage 2 gain is set to zero.
*/

use crate::bits::{extract, f32_to_fixed_i16, fixed_i16_to_f32, insert, RADIX_GAIN};
use crate::errors::VrtResult;
use core::fmt;

/// Gain: stage 1 and stage 2 gain, each a 16-bit fixed-point value with a
/// 7-bit radix, packed into a single word (stage 2 in the upper half, stage
/// 1 in the lower half).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gain {
    /// Stage 1 gain, in dB.
    pub stage_1_gain_db: f32,
    /// Stage 2 gain, in dB.
    pub stage_2_gain_db: f32,
}

impl Gain {
    /// Size of this field in 32-bit words. Always 1.
    pub fn words(&self) -> u32 {
        1
    }

    /// Reads a gain field from the first word of `buf`.
    pub fn read(buf: &[u32]) -> VrtResult<(Gain, u32)> {
        if buf.is_empty() {
            return Err(crate::errors::VrtError::BufSize);
        }
        let word = buf[0];
        let stage_1_gain_db = fixed_i16_to_f32(extract(word, 0, 16) as i16, RADIX_GAIN);
        let stage_2_gain_db = fixed_i16_to_f32(extract(word, 16, 16) as i16, RADIX_GAIN);
        Ok((
            Gain {
                stage_1_gain_db,
                stage_2_gain_db,
            },
            1,
        ))
    }

    /// Writes this gain field into the first word of `buf`.
    pub fn write(&self, buf: &mut [u32]) -> VrtResult<u32> {
        if buf.is_empty() {
            return Err(crate::errors::VrtError::BufSize);
        }
        let s1 = f32_to_fixed_i16(self.stage_1_gain_db, RADIX_GAIN) as u16 as u32;
        let s2 = f32_to_fixed_i16(self.stage_2_gain_db, RADIX_GAIN) as u16 as u32;
        buf[0] = insert(s1, 0, 16) | insert(s2, 16, 16);
        Ok(1)
    }
}

impl fmt::Display for Gain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stage 1: {} dB, stage 2: {} dB",
            self.stage_1_gain_db, self.stage_2_gain_db
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trip() {
        let _ = env_logger::builder().is_test(true).try_init();
        let g = Gain {
            stage_1_gain_db: 25.2,
            stage_2_gain_db: 0.23,
        };
        let mut buf = [0u32; 1];
        g.write(&mut buf).unwrap();
        let (g2, n) = Gain::read(&buf).unwrap();
        assert_eq!(n, 1);
        assert_relative_eq!(g2.stage_1_gain_db, g.stage_1_gain_db, max_relative = 0.01);
        assert_relative_eq!(g2.stage_2_gain_db, g.stage_2_gain_db, max_relative = 0.01);
    }

    #[test]
    fn stage_2_does_not_clobber_stage_1() {
        let g = Gain {
            stage_1_gain_db: 10.0,
            stage_2_gain_db: -5.0,
        };
        let mut buf = [0u32; 1];
        g.write(&mut buf).unwrap();
        let (g2, _) = Gain::read(&buf).unwrap();
        assert_relative_eq!(g2.stage_1_gain_db, 10.0, max_relative = 0.01);
        assert_relative_eq!(g2.stage_2_gain_db, -5.0, max_relative = 0.01);
    }
}
