// src/error.rs
use std::fmt;

use crate::dfa::StateIndex;

/// Fatal, construction-time problems with a caller-supplied [`Dfa`](crate::dfa::Dfa).
///
/// The core trusts its input to be deterministic; these are only raised by
/// [`crate::builder::validate`] for callers that would rather get a
/// [`Result`] than a panic out of [`crate::builder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Two transitions leave the same `(state, symbol)` pair for different
    /// destinations or disagree on `produces_lexeme`.
    NonDeterministic { state: StateIndex, symbol: u8 },
    /// A transition references a state outside `0..num_states()`.
    StateIndexOutOfRange { state: StateIndex, limit: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NonDeterministic { state, symbol } => write!(
                f,
                "non-deterministic DFA: state {state} has more than one transition on symbol {symbol}"
            ),
            BuildError::StateIndexOutOfRange { state, limit } => write!(
                f,
                "state index {state} is out of range (DFA has {limit} states)"
            ),
        }
    }
}

impl std::error::Error for BuildError {}
