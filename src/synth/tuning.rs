/// MIDI number of A4, the 440 Hz reference.
const A4_MIDI: i32 = 69;

/// Equal-tempered frequencies for every voice slot.
///
/// Slot 0 is the C of `base_octave`. Each octave is the row above it times an
/// exact power of two, so `frequency(n + 12) == 2.0 * frequency(n)` holds
/// bit-for-bit.
#[derive(Debug, Clone)]
pub struct NoteFrequencyTable {
    frequencies: Box<[f64]>,
}

impl NoteFrequencyTable {
    pub fn new(base_octave: i32, len: usize) -> Self {
        // MIDI numbering puts C4 at 60, i.e. C of octave o at 12 * (o + 1)
        let base_midi = 12 * (base_octave + 1);
        let row: [f64; 12] = std::array::from_fn(|semitone| {
            let midi = base_midi + semitone as i32;
            440.0 * 2.0_f64.powf((midi - A4_MIDI) as f64 / 12.0)
        });

        let frequencies = (0..len)
            .map(|n| row[n % 12] * 2.0_f64.powi((n / 12) as i32))
            .collect();

        Self { frequencies }
    }

    pub fn frequency(&self, note: usize) -> Option<f64> {
        self.frequencies.get(note).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}
