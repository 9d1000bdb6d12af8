//! Sums the tones that are currently sounding into an interleaved output buffer.

use std::vec::IntoIter;

use cpal::{FromSample, Sample};

pub struct Mixer {
    channels: usize,
    voices: Vec<IntoIter<f32>>,
}

impl Mixer {
    pub fn new(channels: u16) -> Self {
        Self {
            channels: channels.max(1) as usize,
            voices: Vec::new(),
        }
    }

    /// Starts playing a block of mono samples.
    /// Anything still sounding keeps going underneath it.
    pub fn add(&mut self, samples: Vec<f32>) {
        if !samples.is_empty() {
            self.voices.push(samples.into_iter());
        }
    }

    /// Nothing left to play.
    pub fn is_idle(&self) -> bool {
        self.voices.is_empty()
    }

    /// Fills an interleaved buffer, writing the same mono sample to every channel of a frame.
    /// Samples are converted to whatever type the device takes.
    pub fn output<T: Sample + FromSample<f32>>(&mut self, output: &mut [T]) {
        let mut last = T::EQUILIBRIUM;
        for (i, e) in output.iter_mut().enumerate() {
            if i % self.channels == 0 {
                last = T::from_sample(self.next_sample());
            }

            *e = last;
        }
    }

    fn next_sample(&mut self) -> f32 {
        let sum = self
            .voices
            .iter_mut()
            .filter_map(|x| x.next())
            .sum::<f32>();
        self.voices.retain(|x| !x.as_slice().is_empty());
        if sum.is_finite() {
            sum.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}
