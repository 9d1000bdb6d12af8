//! Built-in scales in C, plus helpers to build the sequence that gets sorted.

use rand::{seq::SliceRandom, Rng};

pub const SCALES: &[&str] = &[
    "major",
    "natural-minor",
    "harmonic-minor",
    "melodic-minor",
    "pentatonic-major",
    "pentatonic-minor",
    "blues",
    "dorian",
    "mixolydian",
];

const MAJOR: &[&str] = &["c4", "d4", "e4", "f4", "g4", "a4", "b4", "c5"];
// Aeolian
const NATURAL_MINOR: &[&str] = &["c4", "d4", "d#4", "f4", "g4", "g#4", "a#4", "c5"];
const HARMONIC_MINOR: &[&str] = &["c4", "d4", "d#4", "f4", "g4", "g#4", "b4", "c5"];
// Ascending form
const MELODIC_MINOR: &[&str] = &["c4", "d4", "d#4", "f4", "g4", "a4", "b4", "c5"];
const PENTATONIC_MAJOR: &[&str] = &["c4", "d4", "e4", "g4", "a4", "c5"];
const PENTATONIC_MINOR: &[&str] = &["c4", "d#4", "f4", "g4", "a#4", "c5"];
const BLUES: &[&str] = &["c4", "d#4", "f4", "f#4", "g4", "a#4", "c5"];
const DORIAN: &[&str] = &["c4", "d4", "d#4", "f4", "g4", "a4", "a#4", "c5"];
const MIXOLYDIAN: &[&str] = &["c4", "d4", "e4", "f4", "g4", "a4", "a#4", "c5"];

pub fn get_scale(name: &str) -> Option<&'static [&'static str]> {
    Some(match name.to_ascii_lowercase().as_str() {
        "major" => MAJOR,
        "natural-minor" => NATURAL_MINOR,
        "harmonic-minor" => HARMONIC_MINOR,
        "melodic-minor" => MELODIC_MINOR,
        "pentatonic-major" => PENTATONIC_MAJOR,
        "pentatonic-minor" => PENTATONIC_MINOR,
        "blues" => BLUES,
        "dorian" => DORIAN,
        "mixolydian" => MIXOLYDIAN,
        _ => return None,
    })
}

/// Shuffled copy of the notes.
pub fn scramble<T: Clone>(notes: &[T], rng: &mut impl Rng) -> Vec<T> {
    let mut shuffled = notes.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Repeats the pitch classes of `notes` (everything but the digits) in every octave
/// from `start` to `end` inclusive. Classes keep the order they were first seen in.
pub fn add_octaves<T: AsRef<str>>(notes: &[T], start: u32, end: u32) -> Vec<String> {
    let mut classes = Vec::<String>::new();
    for note in notes {
        let class = note
            .as_ref()
            .chars()
            .filter(|x| !x.is_ascii_digit())
            .collect::<String>();
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    (start..=end)
        .flat_map(|octave| classes.iter().map(move |x| format!("{x}{octave}")))
        .collect()
}
