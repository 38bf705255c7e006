#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/*
Keyboard Oscillators
====================

Every voice carries three phase accumulators, one per waveform. Only the
accumulator of the selected waveform advances, so cycling the waveform while
a key is held never jumps a phase that is already in use.

Units
-----

  sine, square   phase in RADIANS, step = 2π · f / sample_rate
  saw            phase in CYCLES,  step =      f / sample_rate

The saw is the odd one out. It reads the fractional part of the phase
directly, so it counts whole cycles instead of radians:

    w = (0.5 − frac(phase)) × 2

     1.0 ┐╲     ╲     ╲
         │ ╲     ╲     ╲
     0.0 ┤  ╲     ╲     ╲
         │   ╲     ╲     ╲
    -1.0 ┘    ╲     ╲     ╲
         0    1     2     3   cycles

frac() truncates toward zero, so a negative phase ramps the other way. Phases
only ever grow here, so that branch never runs in practice.

The square is sign(sin(phase)) with zero mapped to −1, which means the very
first sample of a fresh phase is always −1.

Phases are never wrapped. sin() and frac() both handle large magnitudes, at
the cost of slow precision drift over very long notes.
*/

/// Waveform used for every sounding voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveType {
    #[default]
    Sine,
    Saw,
    Square,
}

impl WaveType {
    pub const ALL: [WaveType; 3] = [WaveType::Sine, WaveType::Saw, WaveType::Square];

    /// Advance cyclically: Sine → Saw → Square → Sine.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        match self {
            WaveType::Sine => 0,
            WaveType::Saw => 1,
            WaveType::Square => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WaveType::Sine => "Sine",
            WaveType::Saw => "Sawtooth",
            WaveType::Square => "Square",
        }
    }
}

/// Independent phase accumulators for one voice.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OscillatorPhase {
    pub sine: f64,
    pub saw: f64,
    pub square: f64,
}

impl OscillatorPhase {
    /// Produce one sample of `wave` and advance only that waveform's phase.
    #[inline]
    pub fn next_sample(&mut self, wave: WaveType, frequency: f64, sample_rate: f64) -> f64 {
        match wave {
            WaveType::Sine => sine(&mut self.sine, frequency, sample_rate),
            WaveType::Saw => saw(&mut self.saw, frequency, sample_rate),
            WaveType::Square => square(&mut self.square, frequency, sample_rate),
        }
    }
}

#[inline]
pub fn sine(phase: &mut f64, frequency: f64, sample_rate: f64) -> f64 {
    let w = phase.sin();
    *phase += TAU * frequency / sample_rate;
    w
}

#[inline]
pub fn saw(phase: &mut f64, frequency: f64, sample_rate: f64) -> f64 {
    let t = *phase;
    let w = (0.5 - (t - t.trunc())) * 2.0;
    *phase += frequency / sample_rate;
    w
}

#[inline]
pub fn square(phase: &mut f64, frequency: f64, sample_rate: f64) -> f64 {
    let w = if phase.sin() > 0.0 { 1.0 } else { -1.0 };
    *phase += TAU * frequency / sample_rate;
    w
}
