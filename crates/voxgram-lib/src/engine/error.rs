//! Errors that can occur while enumerating matches.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// No enumeration of this node consumes the input.
    #[error("no match")]
    NoMatch,

    /// The input ran out while still a legal prefix of a longer utterance.
    #[error("input is an incomplete prefix of a valid utterance")]
    PrefixOnly,

    /// Execution fuel exhausted (too many `Next` steps).
    #[error("match execution limit exceeded ({0} steps)")]
    FuelExhausted(u32),
}

impl MatchError {
    /// Fatal errors escape immediately instead of triggering backtracking.
    pub fn is_fatal(self) -> bool {
        matches!(self, MatchError::FuelExhausted(_))
    }

    /// Terminal error of an exhausted choice point.
    pub(crate) fn exhausted(prefix_seen: bool) -> Self {
        if prefix_seen {
            MatchError::PrefixOnly
        } else {
            MatchError::NoMatch
        }
    }
}
