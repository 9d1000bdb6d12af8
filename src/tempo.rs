//! Tempo handling.
//! Turns beats per minute into the pause held after every tone.

use std::{thread, time::Duration};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo {
    bpm: u64,
}

impl Tempo {
    pub fn new(bpm: i64) -> Result<Self> {
        if bpm <= 0 {
            return Err(Error::InvalidTempo(bpm));
        }

        Ok(Self { bpm: bpm as u64 })
    }

    pub fn bpm(&self) -> u64 {
        self.bpm
    }

    /// Time between two events, `60 / bpm` seconds.
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.bpm as f64)
    }
}

/// Something that can hold up the caller between two tones.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Blocks the current thread for the whole delay.
/// There is no way to cut a pause short.
pub struct Sleeper;

impl Pacer for Sleeper {
    fn pause(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}
