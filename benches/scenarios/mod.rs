//! Real-world scenario benchmarks.
//!
//! Whole fills through the engine, from a single held note to every voice
//! sounding with both effects on.

mod voices;

pub use voices::bench_voices;
