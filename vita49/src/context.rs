// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Data structures and methods related to the IF context packet payload
(ANSI/VITA-49.0-2015 section 9).
*/

use crate::bits::{
    b2u, extract, f64_to_fixed_i64, fixed_i16_to_f32, fixed_i64_to_f64, insert, read_u64_be,
    u2b, write_u64_be, RADIX_FREQUENCY, RADIX_REFERENCE_LEVEL, RADIX_TEMPERATURE,
};
use crate::context_association_lists::ContextAssociationLists;
use crate::data_packet_payload_format::DataPacketPayloadFormat;
use crate::device_id::DeviceId;
use crate::ecef_ephemeris::Ephemeris;
use crate::errors::{VrtError, VrtResult};
use crate::formatted_gps::FormattedGeolocation;
use crate::gain::Gain;
use crate::gps_ascii::GpsAscii;
use vita49_macros::cif_field;

/// State and event indicators: eight independent optional indicator bits
/// plus eight unconditional user-defined bits.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateAndEvent {
    /// Calibrated time indicator.
    pub calibrated_time: Option<bool>,
    /// Valid data indicator.
    pub valid_data: Option<bool>,
    /// Reference lock indicator.
    pub reference_lock: Option<bool>,
    /// AGC/MGC indicator.
    pub agc_or_mgc: Option<bool>,
    /// Detected signal indicator.
    pub detected_signal: Option<bool>,
    /// Spectral inversion indicator.
    pub spectral_inversion: Option<bool>,
    /// Over-range indicator.
    pub over_range: Option<bool>,
    /// Sample loss indicator.
    pub sample_loss: Option<bool>,
    /// User-defined bits 7 down to 0.
    pub user_defined: [bool; 8],
}

impl StateAndEvent {
    fn pair(word: u32, enable_bit: u32, value_bit: u32) -> Option<bool> {
        if extract(word, enable_bit, 1) != 0 {
            Some(u2b(extract(word, value_bit, 1)))
        } else {
            None
        }
    }

    fn write_pair(value: Option<bool>, enable_bit: u32, value_bit: u32) -> u32 {
        match value {
            Some(v) => insert(1, enable_bit, 1) | insert(b2u(v), value_bit, 1),
            None => 0,
        }
    }

    fn read(word: u32) -> StateAndEvent {
        let mut user_defined = [false; 8];
        for (i, slot) in user_defined.iter_mut().enumerate() {
            *slot = u2b(extract(word, i as u32, 1));
        }
        StateAndEvent {
            calibrated_time: Self::pair(word, 31, 19),
            valid_data: Self::pair(word, 30, 18),
            reference_lock: Self::pair(word, 29, 17),
            agc_or_mgc: Self::pair(word, 28, 16),
            detected_signal: Self::pair(word, 27, 15),
            spectral_inversion: Self::pair(word, 26, 14),
            over_range: Self::pair(word, 25, 13),
            sample_loss: Self::pair(word, 24, 12),
            user_defined,
        }
    }

    fn write(&self) -> u32 {
        let mut word = 0u32;
        word |= Self::write_pair(self.calibrated_time, 31, 19);
        word |= Self::write_pair(self.valid_data, 30, 18);
        word |= Self::write_pair(self.reference_lock, 29, 17);
        word |= Self::write_pair(self.agc_or_mgc, 28, 16);
        word |= Self::write_pair(self.detected_signal, 27, 15);
        word |= Self::write_pair(self.spectral_inversion, 26, 14);
        word |= Self::write_pair(self.over_range, 25, 13);
        word |= Self::write_pair(self.sample_loss, 24, 12);
        for (i, bit) in self.user_defined.iter().enumerate() {
            word |= insert(b2u(*bit), i as u32, 1);
        }
        word
    }
}

/// Context indicator: the 24 presence bits governing which optional fields
/// follow in an IF context packet, plus the context field change indicator.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextIndicator(u32);

impl ContextIndicator {
    cif_field!(context_field_change_indicator, 31);
    cif_field!(reference_point_identifier, 30);
    cif_field!(bandwidth, 29);
    cif_field!(if_reference_frequency, 28);
    cif_field!(rf_reference_frequency, 27);
    cif_field!(rf_reference_frequency_offset, 26);
    cif_field!(if_band_offset, 25);
    cif_field!(reference_level, 24);
    cif_field!(gain, 23);
    cif_field!(over_range_count, 22);
    cif_field!(sample_rate, 21);
    cif_field!(timestamp_adjustment, 20);
    cif_field!(timestamp_calibration_time, 19);
    cif_field!(temperature, 18);
    cif_field!(device_identifier, 17);
    cif_field!(state_and_event_indicators, 16);
    cif_field!(data_packet_payload_format, 15);
    cif_field!(formatted_gps_geolocation, 14);
    cif_field!(formatted_ins_geolocation, 13);
    cif_field!(ecef_ephemeris, 12);
    cif_field!(relative_ephemeris, 11);
    cif_field!(ephemeris_reference_identifier, 10);
    cif_field!(gps_ascii, 9);
    cif_field!(context_association_lists, 8);
}

/// IF context: the payload of an IF context (or extension context) packet.
///
/// Every field is optional; presence is driven by [`ContextIndicator`], which
/// is derived from the struct's own `Option`s rather than stored separately,
/// so the indicator word and the fields it describes cannot drift apart.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfContext<'a> {
    /// Whether this packet signals a change from the previous context packet
    /// on this stream.
    pub context_field_change_indicator: bool,
    /// Identifier of a reference point elsewhere in the system.
    pub reference_point_identifier: Option<u32>,
    /// Bandwidth, Hz, non-negative.
    pub bandwidth: Option<f64>,
    /// IF reference frequency, Hz.
    pub if_reference_frequency: Option<f64>,
    /// RF reference frequency, Hz.
    pub rf_reference_frequency: Option<f64>,
    /// RF reference frequency offset, Hz.
    pub rf_reference_frequency_offset: Option<f64>,
    /// IF band offset, Hz.
    pub if_band_offset: Option<f64>,
    /// Reference level, dBm.
    pub reference_level: Option<f32>,
    /// Stage 1/2 gain.
    pub gain: Option<Gain>,
    /// Over-range count.
    pub over_range_count: Option<u32>,
    /// Sample rate, samples/second, non-negative.
    pub sample_rate: Option<f64>,
    /// Timestamp adjustment, picoseconds, as a raw 64-bit value.
    pub timestamp_adjustment: Option<u64>,
    /// Timestamp calibration time, seconds since the TSI epoch.
    pub timestamp_calibration_time: Option<u32>,
    /// Temperature, degrees Celsius, `>= -273.15`.
    pub temperature: Option<f32>,
    /// Device identifier.
    pub device_identifier: Option<DeviceId>,
    /// State and event indicators.
    pub state_and_event_indicators: Option<StateAndEvent>,
    /// Data packet payload format.
    pub data_packet_payload_format: Option<DataPacketPayloadFormat>,
    /// Formatted GPS geolocation.
    pub formatted_gps_geolocation: Option<FormattedGeolocation>,
    /// Formatted INS geolocation.
    pub formatted_ins_geolocation: Option<FormattedGeolocation>,
    /// ECEF ephemeris.
    pub ecef_ephemeris: Option<Ephemeris>,
    /// Ephemeris relative to a reference point.
    pub relative_ephemeris: Option<Ephemeris>,
    /// Identifier of the reference point `relative_ephemeris` is relative to.
    pub ephemeris_reference_identifier: Option<u32>,
    /// GPS ASCII sentence.
    pub gps_ascii: Option<GpsAscii<'a>>,
    /// Context association lists.
    pub context_association_lists: Option<ContextAssociationLists<'a>>,
}

impl<'a> IfContext<'a> {
    fn indicator(&self) -> ContextIndicator {
        let mut ind = ContextIndicator::default();
        if self.context_field_change_indicator {
            ind.set_context_field_change_indicator();
        }
        macro_rules! set_if_some {
            ($field:ident, $setter:ident) => {
                if self.$field.is_some() {
                    ind.$setter();
                }
            };
        }
        set_if_some!(reference_point_identifier, set_reference_point_identifier);
        set_if_some!(bandwidth, set_bandwidth);
        set_if_some!(if_reference_frequency, set_if_reference_frequency);
        set_if_some!(rf_reference_frequency, set_rf_reference_frequency);
        set_if_some!(
            rf_reference_frequency_offset,
            set_rf_reference_frequency_offset
        );
        set_if_some!(if_band_offset, set_if_band_offset);
        set_if_some!(reference_level, set_reference_level);
        set_if_some!(gain, set_gain);
        set_if_some!(over_range_count, set_over_range_count);
        set_if_some!(sample_rate, set_sample_rate);
        set_if_some!(timestamp_adjustment, set_timestamp_adjustment);
        set_if_some!(
            timestamp_calibration_time,
            set_timestamp_calibration_time
        );
        set_if_some!(temperature, set_temperature);
        set_if_some!(device_identifier, set_device_identifier);
        set_if_some!(
            state_and_event_indicators,
            set_state_and_event_indicators
        );
        set_if_some!(
            data_packet_payload_format,
            set_data_packet_payload_format
        );
        set_if_some!(formatted_gps_geolocation, set_formatted_gps_geolocation);
        set_if_some!(formatted_ins_geolocation, set_formatted_ins_geolocation);
        set_if_some!(ecef_ephemeris, set_ecef_ephemeris);
        set_if_some!(relative_ephemeris, set_relative_ephemeris);
        set_if_some!(
            ephemeris_reference_identifier,
            set_ephemeris_reference_identifier
        );
        set_if_some!(gps_ascii, set_gps_ascii);
        set_if_some!(
            context_association_lists,
            set_context_association_lists
        );
        ind
    }

    /// Size of this payload in 32-bit words, including the indicator word.
    pub fn words(&self) -> u32 {
        let mut words = 1;
        if self.reference_point_identifier.is_some() {
            words += 1;
        }
        if self.bandwidth.is_some() {
            words += 2;
        }
        if self.if_reference_frequency.is_some() {
            words += 2;
        }
        if self.rf_reference_frequency.is_some() {
            words += 2;
        }
        if self.rf_reference_frequency_offset.is_some() {
            words += 2;
        }
        if self.if_band_offset.is_some() {
            words += 2;
        }
        if self.reference_level.is_some() {
            words += 1;
        }
        if self.gain.is_some() {
            words += 1;
        }
        if self.over_range_count.is_some() {
            words += 1;
        }
        if self.sample_rate.is_some() {
            words += 2;
        }
        if self.timestamp_adjustment.is_some() {
            words += 2;
        }
        if self.timestamp_calibration_time.is_some() {
            words += 1;
        }
        if self.temperature.is_some() {
            words += 1;
        }
        if self.device_identifier.is_some() {
            words += 2;
        }
        if self.state_and_event_indicators.is_some() {
            words += 1;
        }
        if let Some(f) = &self.data_packet_payload_format {
            words += f.words();
        }
        if let Some(g) = &self.formatted_gps_geolocation {
            words += g.words();
        }
        if let Some(g) = &self.formatted_ins_geolocation {
            words += g.words();
        }
        if let Some(e) = &self.ecef_ephemeris {
            words += e.words();
        }
        if let Some(e) = &self.relative_ephemeris {
            words += e.words();
        }
        if self.ephemeris_reference_identifier.is_some() {
            words += 1;
        }
        if let Some(g) = &self.gps_ascii {
            words += g.words();
        }
        if let Some(l) = &self.context_association_lists {
            words += l.words();
        }
        words
    }

    /// Validates bandwidth/sample_rate non-negativity and temperature's
    /// lower bound, plus every present subfield's own invariants.
    pub fn validate(&self) -> VrtResult<()> {
        if let Some(v) = self.bandwidth {
            if v < 0.0 {
                return Err(VrtError::Bandwidth);
            }
        }
        if let Some(v) = self.sample_rate {
            if v < 0.0 {
                return Err(VrtError::SampleRate);
            }
        }
        if let Some(v) = self.temperature {
            if v < -273.15 {
                return Err(VrtError::Temperature);
            }
        }
        if let Some(d) = self.device_identifier {
            d.validate()?;
        }
        if let Some(f) = &self.data_packet_payload_format {
            f.validate()?;
        }
        if let Some(g) = &self.formatted_gps_geolocation {
            g.validate()?;
        }
        if let Some(g) = &self.formatted_ins_geolocation {
            g.validate()?;
        }
        if let Some(e) = &self.ecef_ephemeris {
            e.validate()?;
        }
        if let Some(e) = &self.relative_ephemeris {
            e.validate()?;
        }
        if let Some(g) = &self.gps_ascii {
            g.validate()?;
        }
        if let Some(l) = &self.context_association_lists {
            l.validate()?;
        }
        Ok(())
    }

    /// Reads an IF context payload from `buf`.
    pub fn read(buf: &'a [u32], validate: bool) -> VrtResult<(IfContext<'a>, u32)> {
        if buf.is_empty() {
            return Err(VrtError::BufSize);
        }
        let indicator = ContextIndicator(buf[0]);
        let mut offset = 1usize;
        let mut ctx = IfContext {
            context_field_change_indicator: indicator.context_field_change_indicator(),
            ..Default::default()
        };

        macro_rules! take_word {
            () => {{
                let w = *buf.get(offset).ok_or(VrtError::BufSize)?;
                offset += 1;
                w
            }};
        }
        macro_rules! take_freq {
            () => {{
                let hi = *buf.get(offset).ok_or(VrtError::BufSize)?;
                let lo = *buf.get(offset + 1).ok_or(VrtError::BufSize)?;
                offset += 2;
                fixed_i64_to_f64(read_u64_be([hi, lo]) as i64, RADIX_FREQUENCY)
            }};
        }

        if indicator.reference_point_identifier() {
            ctx.reference_point_identifier = Some(take_word!());
        }
        if indicator.bandwidth() {
            ctx.bandwidth = Some(take_freq!());
        }
        if indicator.if_reference_frequency() {
            ctx.if_reference_frequency = Some(take_freq!());
        }
        if indicator.rf_reference_frequency() {
            ctx.rf_reference_frequency = Some(take_freq!());
        }
        if indicator.rf_reference_frequency_offset() {
            ctx.rf_reference_frequency_offset = Some(take_freq!());
        }
        if indicator.if_band_offset() {
            ctx.if_band_offset = Some(take_freq!());
        }
        if indicator.reference_level() {
            let w = take_word!();
            ctx.reference_level = Some(fixed_i16_to_f32(
                extract(w, 0, 16) as i16,
                RADIX_REFERENCE_LEVEL,
            ));
        }
        if indicator.gain() {
            let word = [*buf.get(offset).ok_or(VrtError::BufSize)?];
            let (gain, _) = Gain::read(&word)?;
            ctx.gain = Some(gain);
            offset += 1;
        }
        if indicator.over_range_count() {
            ctx.over_range_count = Some(take_word!());
        }
        if indicator.sample_rate() {
            ctx.sample_rate = Some(take_freq!());
        }
        if indicator.timestamp_adjustment() {
            let hi = *buf.get(offset).ok_or(VrtError::BufSize)?;
            let lo = *buf.get(offset + 1).ok_or(VrtError::BufSize)?;
            offset += 2;
            ctx.timestamp_adjustment = Some(read_u64_be([hi, lo]));
        }
        if indicator.timestamp_calibration_time() {
            ctx.timestamp_calibration_time = Some(take_word!());
        }
        if indicator.temperature() {
            let w = take_word!();
            ctx.temperature = Some(fixed_i16_to_f32(extract(w, 0, 16) as i16, RADIX_TEMPERATURE));
        }
        if indicator.device_identifier() {
            let (d, n) = DeviceId::read(&buf[offset..], validate)?;
            ctx.device_identifier = Some(d);
            offset += n as usize;
        }
        if indicator.state_and_event_indicators() {
            let w = take_word!();
            ctx.state_and_event_indicators = Some(StateAndEvent::read(w));
        }
        if indicator.data_packet_payload_format() {
            let (f, n) = DataPacketPayloadFormat::read(&buf[offset..], validate)?;
            ctx.data_packet_payload_format = Some(f);
            offset += n as usize;
        }
        if indicator.formatted_gps_geolocation() {
            let (g, n) = FormattedGeolocation::read(&buf[offset..], validate)?;
            ctx.formatted_gps_geolocation = Some(g);
            offset += n as usize;
        }
        if indicator.formatted_ins_geolocation() {
            let (g, n) = FormattedGeolocation::read(&buf[offset..], validate)?;
            ctx.formatted_ins_geolocation = Some(g);
            offset += n as usize;
        }
        if indicator.ecef_ephemeris() {
            let (e, n) = Ephemeris::read(&buf[offset..], validate)?;
            ctx.ecef_ephemeris = Some(e);
            offset += n as usize;
        }
        if indicator.relative_ephemeris() {
            let (e, n) = Ephemeris::read(&buf[offset..], validate)?;
            ctx.relative_ephemeris = Some(e);
            offset += n as usize;
        }
        if indicator.ephemeris_reference_identifier() {
            ctx.ephemeris_reference_identifier = Some(take_word!());
        }
        if indicator.gps_ascii() {
            let (g, n) = GpsAscii::read(&buf[offset..], validate)?;
            ctx.gps_ascii = Some(g);
            offset += n as usize;
        }
        if indicator.context_association_lists() {
            let (l, n) = ContextAssociationLists::read(&buf[offset..], validate)?;
            ctx.context_association_lists = Some(l);
            offset += n as usize;
        }

        if validate {
            ctx.validate()?;
        }
        Ok((ctx, offset as u32))
    }

    /// Writes this IF context payload to `buf`.
    pub fn write(&self, buf: &mut [u32], validate: bool) -> VrtResult<u32> {
        if validate {
            self.validate()?;
        }
        let words = self.words() as usize;
        if buf.len() < words {
            return Err(VrtError::BufSize);
        }
        buf[0] = self.indicator().0;
        let mut offset = 1usize;

        macro_rules! put_word {
            ($v:expr) => {{
                buf[offset] = $v;
                offset += 1;
            }};
        }
        macro_rules! put_freq {
            ($v:expr) => {{
                let [hi, lo] = write_u64_be(f64_to_fixed_i64($v, RADIX_FREQUENCY) as u64);
                buf[offset] = hi;
                buf[offset + 1] = lo;
                offset += 2;
            }};
        }

        if let Some(v) = self.reference_point_identifier {
            put_word!(v);
        }
        if let Some(v) = self.bandwidth {
            put_freq!(v);
        }
        if let Some(v) = self.if_reference_frequency {
            put_freq!(v);
        }
        if let Some(v) = self.rf_reference_frequency {
            put_freq!(v);
        }
        if let Some(v) = self.rf_reference_frequency_offset {
            put_freq!(v);
        }
        if let Some(v) = self.if_band_offset {
            put_freq!(v);
        }
        if let Some(v) = self.reference_level {
            put_word!(insert(
                crate::bits::f32_to_fixed_i16(v, RADIX_REFERENCE_LEVEL) as u16 as u32,
                0,
                16
            ));
        }
        if let Some(g) = self.gain {
            g.write(&mut buf[offset..offset + 1])?;
            offset += 1;
        }
        if let Some(v) = self.over_range_count {
            put_word!(v);
        }
        if let Some(v) = self.sample_rate {
            put_freq!(v);
        }
        if let Some(v) = self.timestamp_adjustment {
            let [hi, lo] = write_u64_be(v);
            buf[offset] = hi;
            buf[offset + 1] = lo;
            offset += 2;
        }
        if let Some(v) = self.timestamp_calibration_time {
            put_word!(v);
        }
        if let Some(v) = self.temperature {
            put_word!(insert(
                crate::bits::f32_to_fixed_i16(v, RADIX_TEMPERATURE) as u16 as u32,
                0,
                16
            ));
        }
        if let Some(d) = self.device_identifier {
            let n = d.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }
        if let Some(s) = self.state_and_event_indicators {
            put_word!(s.write());
        }
        if let Some(f) = &self.data_packet_payload_format {
            let n = f.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }
        if let Some(g) = &self.formatted_gps_geolocation {
            let n = g.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }
        if let Some(g) = &self.formatted_ins_geolocation {
            let n = g.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }
        if let Some(e) = &self.ecef_ephemeris {
            let n = e.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }
        if let Some(e) = &self.relative_ephemeris {
            let n = e.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }
        if let Some(v) = self.ephemeris_reference_identifier {
            put_word!(v);
        }
        if let Some(g) = &self.gps_ascii {
            let n = g.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }
        if let Some(l) = &self.context_association_lists {
            let n = l.write(&mut buf[offset..], validate)?;
            offset += n as usize;
        }

        Ok(offset as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_minimal() {
        let ctx = IfContext {
            context_field_change_indicator: true,
            bandwidth: Some(2.4e9),
            reference_level: Some(-10.0),
            temperature: Some(25.0),
            ..Default::default()
        };
        let mut buf = vec![0u32; ctx.words() as usize];
        let n = ctx.write(&mut buf, true).unwrap();
        assert_eq!(n, ctx.words());
        let (ctx2, n2) = IfContext::read(&buf, true).unwrap();
        assert_eq!(n2, n);
        assert_eq!(ctx2.bandwidth, Some(2.4e9));
        assert_eq!(ctx2.context_field_change_indicator, true);
    }

    #[test]
    fn round_trip_with_gps_ascii_and_association_lists() {
        let sentence = [0xAAu32, 0xBB];
        let source = [1u32];
        let ctx = IfContext {
            gps_ascii: Some(GpsAscii {
                manufacturer_oui: 0x123,
                ascii: &sentence,
            }),
            context_association_lists: Some(ContextAssociationLists {
                source_list: &source,
                system_list: &[],
                vector_component_list: &[],
                asynchronous_channel_list: &[],
                asynchronous_channel_tag_list: None,
            }),
            ..Default::default()
        };
        ctx.indicator();
        let mut buf = vec![0u32; ctx.words() as usize];
        ctx.write(&mut buf, true).unwrap();
        let (ctx2, _) = IfContext::read(&buf, true).unwrap();
        assert_eq!(ctx2.gps_ascii.unwrap().ascii, &sentence);
        assert_eq!(
            ctx2.context_association_lists.unwrap().source_list,
            &source
        );
    }

    #[test]
    fn negative_bandwidth_rejected() {
        let ctx = IfContext {
            bandwidth: Some(-1.0),
            ..Default::default()
        };
        let mut buf = vec![0u32; ctx.words() as usize];
        assert_eq!(ctx.write(&mut buf, true), Err(VrtError::Bandwidth));
    }
}
