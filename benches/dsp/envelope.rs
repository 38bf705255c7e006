//! Benchmarks for the release step across a full voice table.

use std::hint::black_box;

use criterion::{BatchSize, Criterion};
use saavy_piano::{dsp::ReleaseEnvelope, synth::voice::VoiceTable};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let envelope = ReleaseEnvelope::default();

    // Every voice held, so every voice decays
    let mut voices = VoiceTable::new(80);
    for note in 0..voices.len() {
        voices.note_on(note);
    }

    group.bench_function("decay_80_voices", |b| {
        // Fresh copy each run so power never drifts into denormals
        b.iter_batched(
            || voices.clone(),
            |mut v| {
                v.decay(black_box(&envelope));
                v
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}
