// src/transition.rs
use crate::dfa::{REJECT, StateIndex};

/// `(result_state, produces_lexeme)`.
///
/// Does double duty across the crate: inside a [`crate::parallel_state::ParallelState`]
/// `result_state` is a DFA state index (or [`REJECT`]); inside a
/// [`crate::merge_table::MergeTable`] cell or `Lexer::initial_states` entry,
/// `result_state` is the index of an interned parallel state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub result_state: StateIndex,
    pub produces_lexeme: bool,
}

impl Default for Transition {
    fn default() -> Self {
        Transition {
            result_state: REJECT,
            produces_lexeme: false,
        }
    }
}
