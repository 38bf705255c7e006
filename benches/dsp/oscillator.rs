//! Benchmarks for waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_piano::dsp::{OscillatorPhase, WaveType};

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        for wave in WaveType::ALL {
            let mut phase = OscillatorPhase::default();
            group.bench_with_input(BenchmarkId::new(wave.name(), size), &size, |b, _| {
                b.iter(|| {
                    for out in buffer.iter_mut() {
                        *out = phase.next_sample(black_box(wave), black_box(440.0), 44_100.0);
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
