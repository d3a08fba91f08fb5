// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the formatted GPS and formatted INS
geolocation context fields, which share an identical layout
(ANSI/VITA-49.0-2015 sections 9.4.5, 9.4.6).
*/

use crate::bits::{
    extract, f64_to_fixed_i32, f64_to_fixed_u32, fixed_i32_to_f64, fixed_u32_to_f64, insert,
    read_u64_be, write_u64_be, RADIX_ALTITUDE, RADIX_ANGLE, RADIX_SPEED_VELOCITY, SENTINEL_U32,
    SENTINEL_U64,
};
use crate::errors::{VrtError, VrtResult};
use crate::packet_header::{Tsf, Tsi};

/// Formatted geolocation: a manufacturer-identified position/attitude fix
/// timestamped independently of the packet's own header timestamp.
///
/// `Option::None` latitude/longitude/altitude/speed/heading/track/magnetic
/// fields map to the standard's "unspecified" `0x7FFFFFFF` sentinel.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormattedGeolocation {
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
    /// Latitude, degrees, range `[-90, 90]`.
    pub latitude: Option<f64>,
    /// Longitude, degrees, range `[-180, 180]`.
    pub longitude: Option<f64>,
    /// Altitude, meters.
    pub altitude: Option<f64>,
    /// Speed over ground, meters/second, non-negative.
    pub speed_over_ground: Option<f64>,
    /// Heading angle, degrees, range `[0, 359.999999761582]`.
    pub heading_angle: Option<f64>,
    /// Track angle, degrees, range `[0, 359.999999761582]`.
    pub track_angle: Option<f64>,
    /// Magnetic variation, degrees, range `[-180, 180]`.
    pub magnetic_variation: Option<f64>,
}

const ANGLE_MAX: f64 = 359.999_999_761_582;

impl FormattedGeolocation {
    /// Size of this field in 32-bit words. Always 11.
    pub fn words(&self) -> u32 {
        11
    }

    /// Validates the field ranges (§7): latitude/longitude/heading/track/magnetic
    /// variation bounds and speed-over-ground non-negativity, each skipped
    /// when the field is unspecified.
    pub fn validate(&self) -> VrtResult<()> {
        if let Some(v) = self.latitude {
            if !(-90.0..=90.0).contains(&v) {
                return Err(VrtError::Latitude);
            }
        }
        if let Some(v) = self.longitude {
            if !(-180.0..=180.0).contains(&v) {
                return Err(VrtError::Longitude);
            }
        }
        if let Some(v) = self.speed_over_ground {
            if v < 0.0 {
                return Err(VrtError::SpeedOverGround);
            }
        }
        if let Some(v) = self.heading_angle {
            if !(0.0..=ANGLE_MAX).contains(&v) {
                return Err(VrtError::HeadingAngle);
            }
        }
        if let Some(v) = self.track_angle {
            if !(0.0..=ANGLE_MAX).contains(&v) {
                return Err(VrtError::TrackAngle);
            }
        }
        if let Some(v) = self.magnetic_variation {
            if !(-180.0..=180.0).contains(&v) {
                return Err(VrtError::MagneticVariation);
            }
        }
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

    /// Reads a formatted geolocation field from the first 11 words of `buf`.
    pub fn read(buf: &[u32], validate: bool) -> VrtResult<(FormattedGeolocation, u32)> {
        if buf.len() < 11 {
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

        let read_angle = |raw: u32| -> Option<f64> {
            if raw == SENTINEL_U32 {
                None
            } else {
                Some(fixed_i32_to_f64(raw as i32, RADIX_ANGLE))
            }
        };
        let read_altitude = |raw: u32| -> Option<f64> {
            if raw == SENTINEL_U32 {
                None
            } else {
                Some(fixed_i32_to_f64(raw as i32, RADIX_ALTITUDE))
            }
        };
        let read_speed = |raw: u32| -> Option<f64> {
            if raw == SENTINEL_U32 {
                None
            } else {
                Some(fixed_u32_to_f64(raw, RADIX_SPEED_VELOCITY))
            }
        };

        let geo = FormattedGeolocation {
            manufacturer_oui,
            tsi,
            tsf,
            integer_second_timestamp,
            fractional_second_timestamp,
            latitude: read_angle(buf[4]),
            longitude: read_angle(buf[5]),
            altitude: read_altitude(buf[6]),
            speed_over_ground: read_speed(buf[7]),
            heading_angle: read_angle(buf[8]),
            track_angle: read_angle(buf[9]),
            magnetic_variation: read_angle(buf[10]),
        };
        if validate {
            geo.validate()?;
        }
        Ok((geo, 11))
    }

    /// Writes this formatted geolocation field into the first 11 words of `buf`.
    ///
    /// The timestamp words are written as all-ones sentinels whenever `tsi`/
    /// `tsf` is `None`, regardless of the in-memory timestamp value; every
    /// other field writes its own `0x7FFFFFFF` sentinel when unspecified.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        if buf.len() < 11 {
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

        let angle = |v: Option<f64>| -> u32 {
            v.map_or(crate::bits::SENTINEL_I32 as u32, |v| {
                f64_to_fixed_i32(v, RADIX_ANGLE) as u32
            })
        };
        let altitude = |v: Option<f64>| -> u32 {
            v.map_or(crate::bits::SENTINEL_I32 as u32, |v| {
                f64_to_fixed_i32(v, RADIX_ALTITUDE) as u32
            })
        };
        let speed = |v: Option<f64>| -> u32 {
            v.map_or(crate::bits::SENTINEL_I32 as u32, |v| {
                f64_to_fixed_u32(v, RADIX_SPEED_VELOCITY)
            })
        };

        buf[4] = angle(self.latitude);
        buf[5] = angle(self.longitude);
        buf[6] = altitude(self.altitude);
        buf[7] = speed(self.speed_over_ground);
        buf[8] = angle(self.heading_angle);
        buf[9] = angle(self.track_angle);
        buf[10] = angle(self.magnetic_variation);

        Ok(11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trip_fully_specified() {
        let geo = FormattedGeolocation {
            manufacturer_oui: 0x00ABCDEF,
            tsi: Tsi::Utc,
            tsf: Tsf::RealTime,
            integer_second_timestamp: Some(100),
            fractional_second_timestamp: Some(200),
            latitude: Some(45.5),
            longitude: Some(-122.3),
            altitude: Some(30.0),
            speed_over_ground: Some(12.5),
            heading_angle: Some(90.0),
            track_angle: Some(180.0),
            magnetic_variation: Some(-10.0),
        };
        let mut buf = [0u32; 11];
        geo.write(&mut buf, true).unwrap();
        let (geo2, n) = FormattedGeolocation::read(&buf, true).unwrap();
        assert_eq!(n, 11);
        assert_relative_eq!(geo2.latitude.unwrap(), 45.5, max_relative = 1e-6);
        assert_relative_eq!(geo2.speed_over_ground.unwrap(), 12.5, max_relative = 1e-5);
    }

    #[test]
    fn unspecified_fields_round_trip_as_none() {
        let geo = FormattedGeolocation::default();
        let mut buf = [0u32; 11];
        geo.write(&mut buf, true).unwrap();
        assert_eq!(buf[1], SENTINEL_U32);
        assert_eq!(read_u64_be([buf[2], buf[3]]), SENTINEL_U64);
        let (geo2, _) = FormattedGeolocation::read(&buf, true).unwrap();
        assert_eq!(geo2.latitude, None);
        assert_eq!(geo2.speed_over_ground, None);
    }

    #[test]
    fn timestamp_sentinel_written_even_if_value_present_but_tsi_none() {
        let geo = FormattedGeolocation {
            tsi: Tsi::None,
            integer_second_timestamp: Some(999),
            ..Default::default()
        };
        let mut buf = [0u32; 11];
        geo.write(&mut buf, false).unwrap();
        assert_eq!(buf[1], SENTINEL_U32);
    }

    #[test]
    fn non_sentinel_timestamp_with_tsi_none_rejected() {
        let geo = FormattedGeolocation {
            tsi: Tsi::None,
            integer_second_timestamp: Some(999),
            ..Default::default()
        };
        let mut buf = [0u32; 11];
        assert_eq!(
            geo.write(&mut buf, true),
            Err(VrtError::IntegerSecondTimestamp)
        );
    }

    #[test]
    fn malformed_wire_timestamp_rejected_on_read() {
        let mut buf = [0u32; 11];
        buf[1] = 999;
        for w in &mut buf[4..] {
            *w = crate::bits::SENTINEL_I32 as u32;
        }
        assert_eq!(
            FormattedGeolocation::read(&buf, true),
            Err(VrtError::IntegerSecondTimestamp)
        );
        assert!(FormattedGeolocation::read(&buf, false).is_ok());
    }

    #[test]
    fn latitude_out_of_range_rejected() {
        let geo = FormattedGeolocation {
            latitude: Some(91.0),
            ..Default::default()
        };
        let mut buf = [0u32; 11];
        assert_eq!(geo.write(&mut buf, true), Err(VrtError::Latitude));
    }

    #[test]
    fn negative_speed_over_ground_rejected() {
        let geo = FormattedGeolocation {
            speed_over_ground: Some(-1.0),
            ..Default::default()
        };
        let mut buf = [0u32; 11];
        assert_eq!(geo.write(&mut buf, true), Err(VrtError::SpeedOverGround));
    }
}
