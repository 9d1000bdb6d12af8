//! Note symbols (`c4`, `d#3`, `eb5`), their ordering key and their frequency.
//!
//! A symbol is a letter `a`..`g` (any case), an optional `#` or `b`, then the octave.
//! The first character is always the letter, so `bb3` is B flat and `b3` is B natural.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Ordering key of a note: `octave * 12 + semitone`.
pub type PitchValue = u64;

/// Tuning reference, A4.
pub const A4_FREQUENCY: f64 = 440.0;
const A4_OCTAVE: i64 = 4;
const SEMITONES: u64 = 12;

/// Highest octave a note may name. Above this the frequency overflows an `f64`.
pub const MAX_OCTAVE: u32 = 1000;

/// Semitones from A within the same octave, indexed by pitch class (C = 0).
const STEPS_FROM_A: [i32; 12] = [-9, -8, -7, -6, -5, -4, -3, -2, -1, 0, 1, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

/// A parsed note symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    letter: Letter,
    accidental: Accidental,
    octave: u32,
    class: u8,
}

impl Letter {
    fn from_char(chr: char) -> Option<Self> {
        Some(match chr {
            'c' => Self::C,
            'd' => Self::D,
            'e' => Self::E,
            'f' => Self::F,
            'g' => Self::G,
            'a' => Self::A,
            'b' => Self::B,
            _ => return None,
        })
    }

    fn as_char(self) -> char {
        match self {
            Self::C => 'c',
            Self::D => 'd',
            Self::E => 'e',
            Self::F => 'f',
            Self::G => 'g',
            Self::A => 'a',
            Self::B => 'b',
        }
    }
}

/// Pitch class of a spelling, or `None` for spellings outside the table (`e#`, `fb`, `b#`).
/// `cb` sits in the same octave as the letter, so `cb4` orders with `b4`.
fn pitch_class(letter: Letter, accidental: Accidental) -> Option<u8> {
    use Accidental::*;
    use Letter::*;

    Some(match (letter, accidental) {
        (C, Natural) => 0,
        (C, Sharp) | (D, Flat) => 1,
        (D, Natural) => 2,
        (D, Sharp) | (E, Flat) => 3,
        (E, Natural) => 4,
        (F, Natural) => 5,
        (F, Sharp) | (G, Flat) => 6,
        (G, Natural) => 7,
        (G, Sharp) | (A, Flat) => 8,
        (A, Natural) => 9,
        (A, Sharp) | (B, Flat) => 10,
        (B, Natural) | (C, Flat) => 11,
        _ => return None,
    })
}

impl Note {
    pub fn new(letter: Letter, accidental: Accidental, octave: u32) -> Option<Self> {
        if octave > MAX_OCTAVE {
            return None;
        }

        let class = pitch_class(letter, accidental)?;
        Some(Self {
            letter,
            accidental,
            octave,
            class,
        })
    }

    pub fn parse(token: &str) -> Result<Self> {
        let lower = token.to_ascii_lowercase();
        let mut chars = lower.chars();

        let letter = match chars.next() {
            Some(chr) => Letter::from_char(chr)
                .ok_or_else(|| Error::malformed(token, "unknown letter"))?,
            None => return Err(Error::malformed(token, "empty note")),
        };

        let rest = chars.as_str();
        let (accidental, octave) = match rest.chars().next() {
            Some('#') => (Accidental::Sharp, &rest[1..]),
            Some('b') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };

        if !octave.chars().any(|x| x.is_ascii_digit()) {
            return Err(Error::malformed(token, "missing octave"));
        }

        if !octave.chars().all(|x| x.is_ascii_digit()) {
            return Err(Error::malformed(token, "unknown accidental"));
        }

        let octave = octave
            .parse::<u32>()
            .ok()
            .filter(|x| *x <= MAX_OCTAVE)
            .ok_or_else(|| Error::malformed(token, "octave out of range"))?;

        Self::new(letter, accidental, octave)
            .ok_or_else(|| Error::malformed(token, "unsupported spelling"))
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> u32 {
        self.octave
    }

    pub fn pitch_value(&self) -> PitchValue {
        self.octave as u64 * SEMITONES + self.class as u64
    }

    /// Equal tempered frequency in Hz, `440 * 2^(h / 12)` with `h` the semitones from A4.
    pub fn frequency(&self) -> f64 {
        let octaves = self.octave as i64 - A4_OCTAVE;
        let steps = STEPS_FROM_A[self.class as usize] as i64 + octaves * SEMITONES as i64;
        A4_FREQUENCY * 2_f64.powf(steps as f64 / SEMITONES as f64)
    }
}

impl FromStr for Note {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidental = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}{}", self.letter.as_char(), accidental, self.octave)
    }
}

pub fn pitch_value(token: &str) -> Result<PitchValue> {
    Ok(Note::parse(token)?.pitch_value())
}

pub fn frequency(token: &str) -> Result<f64> {
    Ok(Note::parse(token)?.frequency())
}
