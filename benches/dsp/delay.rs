//! Benchmarks for the block delay.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_piano::{dsp::FrameDelay, io::frame::SampleFrame};

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    for &size in BLOCK_SIZES {
        let input: Vec<SampleFrame> = (0..size)
            .map(|i| SampleFrame::mono(((i as f64 * 0.1).sin() * 1800.0) as i16))
            .collect();

        // Queue already full: one dequeue, one blend and one recycled copy
        let mut delay = FrameDelay::default();
        let mut buffer = input.clone();
        for _ in 0..delay.depth() {
            delay.apply(&mut buffer);
        }

        group.bench_with_input(BenchmarkId::new("steady", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                delay.apply(black_box(&mut buffer));
            })
        });

        // Block length changes every call, so nothing is recycled
        let mut delay = FrameDelay::default();
        let mut long = input.clone();
        let mut short = input[..size / 2].to_vec();
        group.bench_with_input(BenchmarkId::new("alternating_len", size), &size, |b, _| {
            b.iter(|| {
                delay.apply(black_box(&mut long));
                delay.apply(black_box(&mut short));
            })
        });
    }

    group.finish();
}
