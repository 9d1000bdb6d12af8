//! Merge sort over musical note symbols that plays a tone for every note it compares,
//! paced to a tempo so the sort can be followed by ear.

pub mod args;
pub mod audio;
pub mod error;
pub mod misc;
pub mod note;
pub mod scale;
pub mod sort;
pub mod synth;
pub mod tempo;

pub use error::{Error, Result};
pub use note::{frequency, pitch_value, Note, PitchValue};
pub use sort::{musical_merge_sort, Order, Sorter};
