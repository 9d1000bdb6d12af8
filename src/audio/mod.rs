//! Audio utilities.
//! Tone generation, mixing and the output device.

pub mod devices;
pub mod mixer;
pub mod speaker;
pub mod tone;
