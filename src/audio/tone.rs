use std::f32::consts::PI;

/// Plain sine wave at a fixed frequency.
/// Runs forever unless given a duration in samples.
#[derive(Clone, Copy, Debug)]
pub struct Tone {
    i: usize,
    tone: f32,
    sample_rate: f32,
    duration: Option<usize>,
}

/// A sine tone with the shape every note is played with:
/// scaled by `amplitude` and faded linearly from full volume down to zero
/// over its length, so it ends without a click.
#[derive(Clone, Copy, Debug)]
pub struct FadeTone {
    inner: Tone,
    amplitude: f32,
    length: usize,
}

impl Tone {
    pub fn new(tone: f32, sample_rate: u32) -> Self {
        Self {
            i: 0,
            sample_rate: sample_rate as f32,
            tone,
            duration: None,
        }
    }

    pub fn duration(mut self, duration: usize) -> Self {
        self.duration = Some(duration);
        self
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        match self.duration {
            Some(i) if self.i >= i => return None,
            _ => {}
        }

        let out = (self.i as f32 * self.tone * 2.0 * PI / self.sample_rate).sin();
        self.i += 1;
        Some(out)
    }
}

impl FadeTone {
    /// `duration` is in seconds.
    pub fn new(tone: f32, sample_rate: u32, duration: f32, amplitude: f32) -> Self {
        let length = (sample_rate as f32 * duration) as usize;
        Self {
            inner: Tone::new(tone, sample_rate).duration(length),
            amplitude,
            length,
        }
    }

    pub fn samples(&self) -> usize {
        self.length
    }
}

impl Iterator for FadeTone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.inner.i;
        let raw = self.inner.next()?;

        // 1.0 on the first sample, 0.0 on the last
        let fade = match self.length {
            0 | 1 => 0.0,
            n => 1.0 - i as f32 / (n - 1) as f32,
        };

        Some(raw * self.amplitude * fade)
    }
}
