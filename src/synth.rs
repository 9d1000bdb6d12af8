//! Turns note symbols into sound.
//!
//! The sort engine only sees [`Announce`]: it tells the world about a note and carries on.
//! [`Synthesizer`] is the audible implementation, rendering a faded sine tone at the
//! note's frequency and handing it to an [`Output`]. Anything that goes wrong on the way
//! is logged and swallowed; the sort never hears about it.

use tracing::{debug, warn};

use crate::{
    audio::tone::FadeTone,
    error::{Error, Result},
    note::Note,
};

/// Seconds each note sounds for.
pub const TONE_DURATION: f32 = 0.2;
/// Peak level of a tone, as a fraction of full scale.
pub const TONE_AMPLITUDE: f32 = 0.3;

/// Where rendered mono samples go.
pub trait Output {
    fn sample_rate(&self) -> u32;
    /// Starts playing the samples and returns without waiting for them to finish.
    fn queue(&mut self, samples: Vec<f32>) -> Result<()>;
}

/// Side effect run for every note the sort touches.
pub trait Announce {
    fn announce(&mut self, note: &str);
}

pub struct Synthesizer<O: Output> {
    output: O,
    duration: f32,
    amplitude: f32,
}

impl<O: Output> Synthesizer<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            duration: TONE_DURATION,
            amplitude: TONE_AMPLITUDE,
        }
    }

    /// Renders the tone for a note without playing it.
    pub fn render(&self, note: &str) -> Result<Vec<f32>> {
        let frequency = Note::parse(note)?.frequency() as f32;
        if !frequency.is_finite() {
            return Err(Error::Synthesis(format!("`{note}` is too high to render")));
        }

        let tone = FadeTone::new(
            frequency,
            self.output.sample_rate(),
            self.duration,
            self.amplitude,
        );
        Ok(tone.collect())
    }

    pub fn try_play(&mut self, note: &str) -> Result<()> {
        let samples = self.render(note)?;
        self.output.queue(samples)
    }

    /// Plays a note, logging instead of failing if it can't.
    pub fn play(&mut self, note: &str) {
        match self.try_play(note) {
            Ok(()) => debug!(note, "Playing note"),
            Err(e) => warn!(note, "Could not play note: {e}"),
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<O: Output> Announce for Synthesizer<O> {
    fn announce(&mut self, note: &str) {
        self.play(note);
    }
}

/// Used when there is no audio device. Notes are only logged.
pub struct Silent;

impl Announce for Silent {
    fn announce(&mut self, note: &str) {
        debug!(note, "Skipping note, no output");
    }
}
