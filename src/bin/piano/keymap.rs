//! Computer keyboard layout
//!
//! Two rows of a QWERTY keyboard form the piano: the home row carries the
//! white keys, the row above the black keys.
//!
//! ```text
//!   W E   T Y U   O P   ]
//!  A S D F G H J K L ; ' Enter
//! ```

use crossterm::event::KeyCode;
use saavy_piano::synth::PianoKey;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Note(PianoKey),
    CycleWave,
    ToggleDelay,
    ToggleRelease,
    OctaveDown,
    OctaveUp,
    Quit,
}

pub fn action_for(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Enter => Action::Note(PianoKey::G2),
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'c' => Action::CycleWave,
            'v' => Action::ToggleDelay,
            'b' => Action::ToggleRelease,
            'z' => Action::OctaveDown,
            'x' => Action::OctaveUp,
            other => Action::Note(note_for(other)?),
        },
        _ => return None,
    };
    Some(action)
}

fn note_for(c: char) -> Option<PianoKey> {
    use PianoKey::*;

    let key = match c {
        'a' => C1,
        'w' => Db1,
        's' => D1,
        'e' => Eb1,
        'd' => E1,
        'f' => F1,
        't' => Gb1,
        'g' => G1,
        'y' => Ab1,
        'h' => A1,
        'u' => Bb1,
        'j' => B1,
        'k' => C2,
        'o' => Db2,
        'l' => D2,
        'p' => Eb2,
        ';' => E2,
        '\'' => F2,
        ']' => Gb2,
        _ => return None,
    };
    Some(key)
}

/// Keyboard legend for a piano key
pub fn label(key: PianoKey) -> &'static str {
    use PianoKey::*;

    match key {
        C1 => "A",
        Db1 => "W",
        D1 => "S",
        Eb1 => "E",
        E1 => "D",
        F1 => "F",
        Gb1 => "T",
        G1 => "G",
        Ab1 => "Y",
        A1 => "H",
        Bb1 => "U",
        B1 => "J",
        C2 => "K",
        Db2 => "O",
        D2 => "L",
        Eb2 => "P",
        E2 => ";",
        F2 => "'",
        Gb2 => "]",
        G2 => "⏎",
    }
}
