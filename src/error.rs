//! Error types shared by the note model, the tempo scheduler and the synthesizer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A note symbol that does not follow `<letter>[#|b]<octave>`.
    #[error("Malformed note `{token}`: {reason}")]
    MalformedNote { token: String, reason: &'static str },

    /// Tempo must be a positive number of beats per minute.
    #[error("Invalid tempo {0}: must be greater than zero")]
    InvalidTempo(i64),

    /// A tone could not be produced or queued. Never fatal to a sort.
    #[error("Synthesis failed: {0}")]
    Synthesis(String),
}

impl Error {
    pub(crate) fn malformed(token: &str, reason: &'static str) -> Self {
        Self::MalformedNote {
            token: token.to_owned(),
            reason,
        }
    }
}
