// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use vita49::{IfContext, Packet, Payload};

fn signal_data_packet_words() -> Vec<u32> {
    let samples = vec![0u32; 256];
    let mut packet = Packet::new_signal_data_packet();
    packet.set_stream_id(Some(0xDEAD_BEEF));
    packet.payload = Payload::SignalData(&samples);
    packet.update_packet_size();
    let mut buf = vec![0u32; packet.words() as usize];
    packet.write(&mut buf, true).unwrap();
    buf
}

fn context_packet_words() -> Vec<u32> {
    let mut packet = Packet::new_context_packet();
    packet.payload = Payload::Context(IfContext {
        bandwidth: Some(2.4e9),
        sample_rate: Some(1e6),
        reference_level: Some(-10.0),
        ..Default::default()
    });
    packet.update_packet_size();
    let mut buf = vec![0u32; packet.words() as usize];
    packet.write(&mut buf, true).unwrap();
    buf
}

fn criterion_benchmark(c: &mut Criterion) {
    let signal_data = signal_data_packet_words();
    let context = context_packet_words();
    c.bench_function("parse signal data packet", |p| {
        p.iter(|| Packet::read(black_box(&signal_data), true).unwrap())
    });
    c.bench_function("parse context packet", |p| {
        p.iter(|| Packet::read(black_box(&context), true).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
