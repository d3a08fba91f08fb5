// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the ECEF and relative ephemeris
context fields, which share an identical layout
(ANSI/VITA-49.0-2015 sections 9.4.3, 9.4.9).
*/

use crate::bits::{
    extract, f64_to_fixed_i32, fixed_i32_to_f64, insert, read_u64_be, write_u64_be, RADIX_ANGLE,
    RADIX_POSITION, RADIX_SPEED_VELOCITY, SENTINEL_U32, SENTINEL_U64,
};
use crate::errors::{VrtError, VrtResult};
use crate::packet_header::{Tsf, Tsi};

/// Ephemeris: a manufacturer-identified position/attitude/velocity fix,
/// either earth-centered-earth-fixed or relative to a reference point.
///
/// Unlike [`crate::formatted_gps::FormattedGeolocation`], position, attitude,
/// and velocity fields are never substituted with the unspecified sentinel on
/// write; only the timestamp fields are, mirroring the reference
/// implementation's behaviour exactly.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ephemeris {
    /// Manufacturer organizationally unique identifier (24 bits).
    pub manufacturer_oui: u32,
    /// Integer-seconds timestamp kind for this field's own timestamp.
    pub tsi: Tsi,
    /// Fractional-seconds timestamp kind for this field's own timestamp.
    pub tsf: Tsf,
    /// Integer-seconds timestamp value.
    pub integer_second_timestamp: Option<u32>,
    /// Fractional-seconds timestamp value.
    pub fractional_second_timestamp: Option<u64>,
    /// Position X, meters.
    pub position_x: f64,
    /// Position Y, meters.
    pub position_y: f64,
    /// Position Z, meters.
    pub position_z: f64,
    /// Attitude alpha, degrees.
    pub altitude_alpha: f64,
    /// Attitude beta, degrees.
    pub altitude_beta: f64,
    /// Attitude phi, degrees.
    pub altitude_phi: f64,
    /// Velocity dX, meters/second.
    pub velocity_dx: f64,
    /// Velocity dY, meters/second.
    pub velocity_dy: f64,
    /// Velocity dZ, meters/second.
    pub velocity_dz: f64,
}

impl Ephemeris {
    /// Size of this field in 32-bit words. Always 13.
    pub fn words(&self) -> u32 {
        13
    }

    /// Validates that `manufacturer_oui` fits in its 24-bit field. Position,
    /// attitude, and velocity fields carry no range constraint.
    pub fn validate(&self) -> VrtResult<()> {
        if self.manufacturer_oui > 0x00FF_FFFF {
            return Err(VrtError::Oui);
        }
        match (self.tsi, self.integer_second_timestamp) {
            (Tsi::None, Some(v)) if v != SENTINEL_U32 => {
                return Err(VrtError::IntegerSecondTimestamp)
            }
            _ => {}
        }
        match (self.tsf, self.fractional_second_timestamp) {
            (Tsf::None, Some(v)) if v != SENTINEL_U64 => {
                return Err(VrtError::FractionalSecondTimestamp)
            }
            _ => {}
        }
        Ok(())
    }

    /// Reads an ephemeris field from the first 13 words of `buf`.
    pub fn read(buf: &[u32], validate: bool) -> VrtResult<(Ephemeris, u32)> {
        if buf.len() < 13 {
            return Err(VrtError::BufSize);
        }
        let tsi = Tsi::try_from(extract(buf[0], 26, 2))?;
        let tsf = Tsf::try_from(extract(buf[0], 24, 2))?;
        let manufacturer_oui = extract(buf[0], 0, 24);
        let integer_second_timestamp = if tsi == Tsi::None && buf[1] == SENTINEL_U32 {
            None
        } else {
            Some(buf[1])
        };
        let raw_frac = read_u64_be([buf[2], buf[3]]);
        let fractional_second_timestamp = if tsf == Tsf::None && raw_frac == SENTINEL_U64 {
            None
        } else {
            Some(raw_frac)
        };

        let pos = |raw: u32| fixed_i32_to_f64(raw as i32, RADIX_POSITION);
        let angle = |raw: u32| fixed_i32_to_f64(raw as i32, RADIX_ANGLE);
        let vel = |raw: u32| fixed_i32_to_f64(raw as i32, RADIX_SPEED_VELOCITY);

        let e = Ephemeris {
            manufacturer_oui,
            tsi,
            tsf,
            integer_second_timestamp,
            fractional_second_timestamp,
            position_x: pos(buf[4]),
            position_y: pos(buf[5]),
            position_z: pos(buf[6]),
            altitude_alpha: angle(buf[7]),
            altitude_beta: angle(buf[8]),
            altitude_phi: angle(buf[9]),
            velocity_dx: vel(buf[10]),
            velocity_dy: vel(buf[11]),
            velocity_dz: vel(buf[12]),
        };
        if validate {
            e.validate()?;
        }
        Ok((e, 13))
    }

    /// Writes this ephemeris field into the first 13 words of `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        if buf.len() < 13 {
            return Err(VrtError::BufSize);
        }
        if self.manufacturer_oui > 0x00FF_FFFF {
            return Err(VrtError::Oui);
        }

        buf[0] = insert(self.tsi as u32, 26, 2)
            | insert(self.tsf as u32, 24, 2)
            | insert(self.manufacturer_oui, 0, 24);
        buf[1] = if self.tsi != Tsi::None {
            self.integer_second_timestamp.unwrap_or(SENTINEL_U32)
        } else {
            SENTINEL_U32
        };
        let frac = if self.tsf != Tsf::None {
            self.fractional_second_timestamp.unwrap_or(SENTINEL_U64)
        } else {
            SENTINEL_U64
        };
        let [hi, lo] = write_u64_be(frac);
        buf[2] = hi;
        buf[3] = lo;

        buf[4] = f64_to_fixed_i32(self.position_x, RADIX_POSITION) as u32;
        buf[5] = f64_to_fixed_i32(self.position_y, RADIX_POSITION) as u32;
        buf[6] = f64_to_fixed_i32(self.position_z, RADIX_POSITION) as u32;
        buf[7] = f64_to_fixed_i32(self.altitude_alpha, RADIX_ANGLE) as u32;
        buf[8] = f64_to_fixed_i32(self.altitude_beta, RADIX_ANGLE) as u32;
        buf[9] = f64_to_fixed_i32(self.altitude_phi, RADIX_ANGLE) as u32;
        buf[10] = f64_to_fixed_i32(self.velocity_dx, RADIX_SPEED_VELOCITY) as u32;
        buf[11] = f64_to_fixed_i32(self.velocity_dy, RADIX_SPEED_VELOCITY) as u32;
        buf[12] = f64_to_fixed_i32(self.velocity_dz, RADIX_SPEED_VELOCITY) as u32;

        Ok(13)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trip() {
        let e = Ephemeris {
            manufacturer_oui: 0x00ABCDEF,
            tsi: Tsi::Gps,
            tsf: Tsf::SampleCount,
            integer_second_timestamp: Some(1),
            fractional_second_timestamp: Some(2),
            position_x: 100.0,
            position_y: -200.0,
            position_z: 300.5,
            altitude_alpha: 1.0,
            altitude_beta: 2.0,
            altitude_phi: 3.0,
            velocity_dx: 10.0,
            velocity_dy: -10.0,
            velocity_dz: 0.0,
        };
        let mut buf = [0u32; 13];
        e.write(&mut buf, true).unwrap();
        let (e2, n) = Ephemeris::read(&buf, true).unwrap();
        assert_eq!(n, 13);
        assert_relative_eq!(e2.position_x, 100.0, max_relative = 1e-5);
        assert_relative_eq!(e2.velocity_dy, -10.0, max_relative = 1e-5);
    }

    #[test]
    fn undefined_timestamp_writes_sentinel_but_position_does_not_substitute() {
        let e = Ephemeris {
            tsi: Tsi::None,
            position_x: 1.0,
            ..Default::default()
        };
        let mut buf = [0u32; 13];
        e.write(&mut buf, true).unwrap();
        assert_eq!(buf[1], SENTINEL_U32);
        assert_ne!(buf[4], crate::bits::SENTINEL_I32 as u32);
    }

    #[test]
    fn non_sentinel_timestamp_with_tsi_none_rejected() {
        let e = Ephemeris {
            tsi: Tsi::None,
            integer_second_timestamp: Some(999),
            ..Default::default()
        };
        let mut buf = [0u32; 13];
        assert_eq!(
            e.write(&mut buf, true),
            Err(VrtError::IntegerSecondTimestamp)
        );
    }

    #[test]
    fn malformed_wire_timestamp_rejected_on_read() {
        let mut buf = [0u32; 13];
        buf[1] = 999;
        assert_eq!(
            Ephemeris::read(&buf, true),
            Err(VrtError::IntegerSecondTimestamp)
        );
        assert!(Ephemeris::read(&buf, false).is_ok());
    }
}
