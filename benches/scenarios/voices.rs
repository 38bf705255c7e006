//! Benchmarks for polyphonic fills.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_piano::{
    dsp::WaveType,
    synth::{self, SynthParts},
    SynthConfig,
};

use crate::BLOCK_SIZES;

fn engine_with(config: SynthConfig, notes: usize) -> SynthParts {
    let mut parts = synth::build(&config).expect("valid bench config");
    // Prime the engine directly so notes outside the keyboard window sound too
    for note in 0..notes {
        parts
            .engine
            .handle_message(synth::SynthMessage::NoteOn { note });
    }
    parts
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        // === SINGLE NOTE ===
        // Baseline: one sine voice, no effects
        let mut single = engine_with(SynthConfig::default(), 1);
        group.bench_with_input(BenchmarkId::new("single_sine", size), &size, |b, _| {
            b.iter(|| {
                black_box(single.engine.render(black_box(size)));
            })
        });

        // === CHORD ===
        // Ten saw voices, roughly two hands on the keyboard
        let mut chord = engine_with(SynthConfig::default().wave_type(WaveType::Saw), 10);
        group.bench_with_input(BenchmarkId::new("chord_saw", size), &size, |b, _| {
            b.iter(|| {
                black_box(chord.engine.render(black_box(size)));
            })
        });

        // === WORST CASE ===
        // Every voice on, release and delay both active
        let config = SynthConfig::default()
            .wave_type(WaveType::Square)
            .delay(true)
            .release(true);
        let voices = config.voice_count();
        let mut full = engine_with(config, voices);
        group.bench_with_input(BenchmarkId::new("all_voices_fx", size), &size, |b, _| {
            b.iter(|| {
                black_box(full.engine.render(black_box(size)));
            })
        });
    }

    group.finish();
}
