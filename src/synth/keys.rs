/// The twenty playable keys: C of the base octave up to the G of the next,
/// accidentals included.
///
/// The discriminant is the semitone offset from the octave base, so the
/// absolute note for a key is `key.offset() + octave_base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PianoKey {
    C1 = 0,
    Db1,
    D1,
    Eb1,
    E1,
    F1,
    Gb1,
    G1,
    Ab1,
    A1,
    Bb1,
    B1,
    C2,
    Db2,
    D2,
    Eb2,
    E2,
    F2,
    Gb2,
    G2,
}

impl PianoKey {
    pub const COUNT: usize = 20;

    pub const ALL: [PianoKey; Self::COUNT] = [
        PianoKey::C1,
        PianoKey::Db1,
        PianoKey::D1,
        PianoKey::Eb1,
        PianoKey::E1,
        PianoKey::F1,
        PianoKey::Gb1,
        PianoKey::G1,
        PianoKey::Ab1,
        PianoKey::A1,
        PianoKey::Bb1,
        PianoKey::B1,
        PianoKey::C2,
        PianoKey::Db2,
        PianoKey::D2,
        PianoKey::Eb2,
        PianoKey::E2,
        PianoKey::F2,
        PianoKey::Gb2,
        PianoKey::G2,
    ];

    /// Semitones above the octave base.
    #[inline]
    pub fn offset(self) -> usize {
        self as usize
    }

    pub fn from_offset(offset: usize) -> Option<Self> {
        Self::ALL.get(offset).copied()
    }

    pub fn is_white(self) -> bool {
        !matches!(self.offset() % 12, 1 | 3 | 6 | 8 | 10)
    }
}
