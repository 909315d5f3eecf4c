//! Criterion benchmarks for the Elo frame decoder.
//!
//! At 9600 baud the controller delivers under 1000 bytes per second, so the
//! decoder is nowhere near a bottleneck; these benchmarks exist to catch
//! accidental allocation or logging in the per-byte path.
//!
//! Run with:
//! ```bash
//! cargo bench --package elo-core --bench decoder_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use elo_core::protocol::frame::encode_touch_frame;
use elo_core::{FrameDecoder, TouchEvent};

// ── Stream fixtures ───────────────────────────────────────────────────────────

/// A stroke across the screen: press, `frames - 2` moves, release.
fn make_stroke(frames: usize) -> Vec<u8> {
    (0..frames)
        .flat_map(|i| {
            let touch = i + 1 < frames;
            let event = TouchEvent {
                touch,
                x: (i * 7 % 4096) as u16,
                y: (i * 13 % 4096) as u16,
                z: if touch { 128 } else { 0 },
                status: if touch { 0x03 } else { 0x00 },
            };
            encode_touch_frame(&event)
        })
        .collect()
}

/// The same stroke with a corrupted checksum on every fourth frame and line
/// noise between frames.
fn make_noisy_stroke(frames: usize) -> Vec<u8> {
    let clean = make_stroke(frames);
    let mut noisy = Vec::with_capacity(clean.len() * 2);
    for (i, frame) in clean.chunks(10).enumerate() {
        noisy.extend_from_slice(&[0x00, 0xFF]);
        noisy.extend_from_slice(frame);
        if i % 4 == 0 {
            if let Some(last) = noisy.last_mut() {
                *last ^= 0xFF;
            }
        }
    }
    noisy
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for frames in [1usize, 64, 1024] {
        let clean = make_stroke(frames);
        let noisy = make_noisy_stroke(frames);

        group.throughput(Throughput::Bytes(clean.len() as u64));
        group.bench_with_input(BenchmarkId::new("clean", frames), &clean, |b, bytes| {
            b.iter(|| {
                let mut decoder = FrameDecoder::new(false);
                decoder.events(black_box(bytes).iter().copied()).count()
            })
        });

        group.throughput(Throughput::Bytes(noisy.len() as u64));
        group.bench_with_input(BenchmarkId::new("noisy", frames), &noisy, |b, bytes| {
            b.iter(|| {
                let mut decoder = FrameDecoder::new(false);
                decoder.events(black_box(bytes).iter().copied()).count()
            })
        });

        group.bench_with_input(BenchmarkId::new("edge_triggered", frames), &clean, |b, bytes| {
            b.iter(|| {
                let mut decoder = FrameDecoder::new(true);
                decoder.events(black_box(bytes).iter().copied()).count()
            })
        });
    }

    group.finish();
}

fn bench_single_byte(c: &mut Criterion) {
    c.bench_function("process_single_byte", |b| {
        let mut decoder = FrameDecoder::new(false);
        let frame = make_stroke(2);
        let mut i = 0usize;
        b.iter(|| {
            let byte = frame[i % frame.len()];
            i = i.wrapping_add(1);
            black_box(decoder.process(black_box(byte)))
        })
    });
}

criterion_group!(benches, bench_decode, bench_single_byte);
criterion_main!(benches);
