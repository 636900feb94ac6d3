use thiserror::Error;

/// Errors raised by the poll engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// Fewer than two non-blank options were supplied at creation.
    #[error("A poll needs at least {min} options, got {given}.")]
    InvalidOptions {
        /// Minimum number of options a poll accepts
        min: usize,
        /// Number of usable options supplied
        given: usize,
    },

    /// The requested open window is outside the accepted bounds.
    #[error("Poll duration must be between {min} and {max} seconds, got {given}.")]
    InvalidDuration { min: u64, max: u64, given: u64 },

    /// A vote arrived after the poll was closed.
    #[error("This poll is closed.")]
    PollClosed,

    /// A vote referenced an option the poll doesn't have.
    ///
    /// Buttons are generated from the poll's own options, so this indicates a bug or a
    /// forged custom id rather than user error.
    #[error("Option index {index} is out of range for a poll with {len} options")]
    InvalidOptionIndex { index: usize, len: usize },
}
