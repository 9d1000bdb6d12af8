//! Merge sort that plays every note it looks at.
//!
//! Each merge step announces the note under the left cursor, waits a beat, announces
//! the note under the right cursor, waits a beat, and only then compares them. Once a
//! half runs out, the rest of the other half is announced and appended one beat at a time.
//! Comparison itself is a pure function of the two pitch values.

use std::time::Duration;

use tracing::{info, trace, warn};

use crate::{
    audio::speaker::Speaker,
    error::Result,
    note::{pitch_value, PitchValue},
    synth::{Announce, Silent, Synthesizer},
    tempo::{Pacer, Sleeper, Tempo},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    /// Whether the left candidate goes first. Ties always go to the left.
    pub fn takes_left(self, left: PitchValue, right: PitchValue) -> bool {
        match self {
            Self::Ascending => left <= right,
            Self::Descending => left >= right,
        }
    }
}

/// A note borrowed from the input along with its precomputed pitch.
struct Keyed<'a, T> {
    pitch: PitchValue,
    item: &'a T,
}

impl<T> Clone for Keyed<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Keyed<'_, T> {}

/// Parses every note up front so a bad symbol fails the sort before anything is played.
fn key_notes<T: AsRef<str>>(notes: &[T]) -> Result<Vec<Keyed<'_, T>>> {
    notes
        .iter()
        .map(|item| pitch_value(item.as_ref()).map(|pitch| Keyed { pitch, item }))
        .collect()
}

pub struct Sorter<A: Announce, P: Pacer> {
    announcer: A,
    pacer: P,
    delay: Duration,
    order: Order,
}

impl<A: Announce, P: Pacer> Sorter<A, P> {
    pub fn new(announcer: A, pacer: P, tempo: Tempo, order: Order) -> Self {
        Self {
            announcer,
            pacer,
            delay: tempo.delay(),
            order,
        }
    }

    /// Returns a sorted copy of `notes`. The input is left as it was.
    pub fn sort<T: AsRef<str> + Clone>(&mut self, notes: &[T]) -> Result<Vec<T>> {
        let keyed = key_notes(notes)?;
        Ok(self.sort_keyed(&keyed))
    }

    pub fn into_parts(self) -> (A, P) {
        (self.announcer, self.pacer)
    }

    fn sort_keyed<T: AsRef<str> + Clone>(&mut self, keyed: &[Keyed<'_, T>]) -> Vec<T> {
        self.sort_span(keyed)
            .into_iter()
            .map(|x| x.item.clone())
            .collect()
    }

    fn sort_span<'a, T: AsRef<str>>(&mut self, span: &[Keyed<'a, T>]) -> Vec<Keyed<'a, T>> {
        if span.len() <= 1 {
            return span.to_vec();
        }

        let mid = span.len() / 2;
        let left = self.sort_span(&span[..mid]);
        let right = self.sort_span(&span[mid..]);
        self.merge(&left, &right)
    }

    fn merge<'a, T: AsRef<str>>(
        &mut self,
        left: &[Keyed<'a, T>],
        right: &[Keyed<'a, T>],
    ) -> Vec<Keyed<'a, T>> {
        trace!(left = left.len(), right = right.len(), "Merging");
        let mut result = Vec::with_capacity(left.len() + right.len());
        let (mut i, mut j) = (0, 0);

        while i < left.len() && j < right.len() {
            self.beat(left[i].item.as_ref());
            self.beat(right[j].item.as_ref());

            if self.order.takes_left(left[i].pitch, right[j].pitch) {
                result.push(left[i]);
                i += 1;
            } else {
                result.push(right[j]);
                j += 1;
            }
        }

        for e in left[i..].iter().chain(&right[j..]) {
            self.beat(e.item.as_ref());
            result.push(*e);
        }

        result
    }

    fn beat(&mut self, note: &str) {
        self.announcer.announce(note);
        self.pacer.pause(self.delay);
    }
}

/// Sorts notes out loud on a real output device.
///
/// The device is opened once the tempo and every note have been validated, and released
/// when the sort returns. If it can't be opened the sort still runs, silently, at the
/// same pace. `device` of `None` skips audio altogether.
pub fn musical_merge_sort<T: AsRef<str> + Clone>(
    notes: &[T],
    bpm: i64,
    order: Order,
    device: Option<&str>,
) -> Result<Vec<T>> {
    let tempo = Tempo::new(bpm)?;
    let keyed = key_notes(notes)?;
    info!(
        notes = notes.len(),
        bpm = tempo.bpm(),
        ?order,
        "Starting musical merge sort"
    );

    let sorted = match device.map(Speaker::open) {
        Some(Ok(speaker)) => {
            Sorter::new(Synthesizer::new(speaker), Sleeper, tempo, order).sort_keyed(&keyed)
        }
        Some(Err(e)) => {
            warn!("Audio unavailable, sorting silently: {e:#}");
            Sorter::new(Silent, Sleeper, tempo, order).sort_keyed(&keyed)
        }
        None => Sorter::new(Silent, Sleeper, tempo, order).sort_keyed(&keyed),
    };

    Ok(sorted)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::{musical_merge_sort, Order, Sorter};
    use crate::{
        error::{Error, Result},
        note::pitch_value,
        synth::{Announce, Output, Synthesizer},
        tempo::{Pacer, Tempo},
    };

    const SPELLINGS: [&str; 18] = [
        "c", "c#", "db", "d", "d#", "eb", "e", "f", "f#", "gb", "g", "g#", "ab", "a", "a#", "bb",
        "b", "cb",
    ];

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Announce for Recorder {
        fn announce(&mut self, note: &str) {
            self.0.push(note.to_owned());
        }
    }

    #[derive(Default)]
    struct Pauses(Vec<Duration>);

    impl Pacer for Pauses {
        fn pause(&mut self, delay: Duration) {
            self.0.push(delay);
        }
    }

    /// An output whose device has gone away. Counts what it was asked to play.
    #[derive(Default)]
    struct Unplugged(usize);

    impl Output for Unplugged {
        fn sample_rate(&self) -> u32 {
            8000
        }

        fn queue(&mut self, _samples: Vec<f32>) -> Result<()> {
            self.0 += 1;
            Err(Error::Synthesis("device unplugged".to_owned()))
        }
    }

    /// A note that remembers where it started, to check stability.
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct Tagged {
        note: String,
        index: usize,
    }

    impl AsRef<str> for Tagged {
        fn as_ref(&self) -> &str {
            &self.note
        }
    }

    fn sorter(order: Order) -> Sorter<Recorder, Pauses> {
        Sorter::new(
            Recorder::default(),
            Pauses::default(),
            Tempo::new(480).unwrap(),
            order,
        )
    }

    fn random_notes(rng: &mut StdRng, len: usize) -> Vec<Tagged> {
        (0..len)
            .map(|index| Tagged {
                note: format!("{}{}", SPELLINGS[rng.gen_range(0..18)], rng.gen_range(2..6)),
                index,
            })
            .collect()
    }

    fn pitches<T: AsRef<str>>(notes: &[T]) -> Vec<u64> {
        notes.iter().map(|x| pitch_value(x.as_ref()).unwrap()).collect()
    }

    #[test]
    fn test_sort_ascending_example() {
        let input = ["c5", "c4", "g4"];
        let mut sorter = sorter(Order::Ascending);
        assert_eq!(sorter.sort(&input).unwrap(), ["c4", "g4", "c5"]);
        assert_eq!(input, ["c5", "c4", "g4"]);

        let (recorder, pauses) = sorter.into_parts();
        assert_eq!(
            recorder.0,
            ["c4", "g4", "g4", "c5", "c4", "c5", "g4", "c5"]
        );
        assert_eq!(pauses.0, vec![Duration::from_millis(125); 8]);
    }

    #[test]
    fn test_failed_output_keeps_pace() {
        let mut sorter = Sorter::new(
            Synthesizer::new(Unplugged::default()),
            Pauses::default(),
            Tempo::new(480).unwrap(),
            Order::Ascending,
        );
        assert_eq!(sorter.sort(&["c5", "c4", "g4"]).unwrap(), ["c4", "g4", "c5"]);

        let (synth, pauses) = sorter.into_parts();
        assert_eq!(synth.output().0, 8);
        assert_eq!(pauses.0, vec![Duration::from_millis(125); 8]);
    }

    #[test]
    fn test_sort_descending_example() {
        let mut sorter = sorter(Order::Descending);
        assert_eq!(sorter.sort(&["c5", "c4", "g4"]).unwrap(), ["c5", "g4", "c4"]);

        let (recorder, _) = sorter.into_parts();
        assert_eq!(recorder.0, ["c4", "g4", "c4", "c5", "g4", "g4", "c4"]);
    }

    #[test]
    fn test_sorted_input_events() {
        let input = ["c4", "d4", "e4", "f4"];
        let mut sorter = sorter(Order::Ascending);
        assert_eq!(sorter.sort(&input).unwrap(), input);

        let (recorder, pauses) = sorter.into_parts();
        assert_eq!(
            recorder.0,
            ["c4", "d4", "d4", "e4", "f4", "f4", "c4", "e4", "d4", "e4", "e4", "f4"]
        );
        assert_eq!(pauses.0.len(), recorder.0.len());
    }

    #[test]
    fn test_empty_and_single() {
        let mut sorter = sorter(Order::Ascending);
        assert!(sorter.sort::<&str>(&[]).unwrap().is_empty());
        assert_eq!(sorter.sort(&["eb3"]).unwrap(), ["eb3"]);

        let (recorder, pauses) = sorter.into_parts();
        assert!(recorder.0.is_empty());
        assert!(pauses.0.is_empty());
    }

    #[test]
    fn test_malformed_note_aborts_before_playing() {
        let mut sorter = sorter(Order::Ascending);
        assert_eq!(
            sorter.sort(&["c4", "d4", "q4", "e4"]),
            Err(Error::MalformedNote {
                token: "q4".to_owned(),
                reason: "unknown letter"
            })
        );
        assert!(matches!(
            sorter.sort(&["c"]),
            Err(Error::MalformedNote { .. })
        ));
        assert!(sorter.into_parts().0 .0.is_empty());
    }

    #[test]
    fn test_enharmonic_mix() {
        let mut sorter = sorter(Order::Ascending);
        let sorted = sorter.sort(&["e4", "eb4", "d4", "d#4", "c4"]).unwrap();
        assert_eq!(sorted, ["c4", "d4", "eb4", "d#4", "e4"]);
    }

    #[test]
    fn test_random_ordering_and_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in 0..40 {
            let input = random_notes(&mut rng, len);

            for order in [Order::Ascending, Order::Descending] {
                let sorted = sorter(order).sort(&input).unwrap();
                let values = pitches(&sorted);
                assert!(values.windows(2).all(|x| match order {
                    Order::Ascending => x[0] <= x[1],
                    Order::Descending => x[0] >= x[1],
                }));

                let mut a = input.clone();
                let mut b = sorted.clone();
                a.sort();
                b.sort();
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_random_stability() {
        let mut rng = StdRng::seed_from_u64(1337);
        for _ in 0..50 {
            let input = random_notes(&mut rng, 30);

            for order in [Order::Ascending, Order::Descending] {
                let sorted = sorter(order).sort(&input).unwrap();
                for x in sorted.windows(2) {
                    if pitch_value(&x[0].note).unwrap() == pitch_value(&x[1].note).unwrap() {
                        assert!(x[0].index < x[1].index, "{x:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let mut rng = StdRng::seed_from_u64(9);
        let input = random_notes(&mut rng, 25);

        let once = sorter(Order::Ascending).sort(&input).unwrap();
        let twice = sorter(Order::Ascending).sort(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_event_count_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let input = random_notes(&mut rng, 16);
        let mut sorter = sorter(Order::Ascending);
        sorter.sort(&input).unwrap();

        // 4 merge levels, every element announced at least once and at most twice per level
        let events = sorter.into_parts().0 .0.len();
        assert!((16 * 4..=16 * 4 * 2).contains(&events));
    }

    #[test]
    fn test_takes_left_on_ties() {
        assert!(Order::Ascending.takes_left(48, 48));
        assert!(Order::Descending.takes_left(48, 48));
        assert!(!Order::Ascending.takes_left(49, 48));
        assert!(!Order::Descending.takes_left(47, 48));
        assert_eq!(Order::from_ascending(false), Order::Descending);
    }

    #[test]
    fn test_musical_merge_sort_silent() {
        let sorted = musical_merge_sort(&["c5", "c4", "g4"], 600_000, Order::Ascending, None);
        assert_eq!(sorted.unwrap(), ["c4", "g4", "c5"]);
    }

    #[test]
    fn test_musical_merge_sort_invalid_tempo() {
        assert_eq!(
            musical_merge_sort(&["c4"], 0, Order::Ascending, None),
            Err(Error::InvalidTempo(0))
        );
    }
}
