// src/artifact.rs
use crate::dfa::{LexemeHandle, MAX_SYM, REJECT, StateIndex};
use crate::merge_table::MergeTable;
use crate::transition::Transition;

/// The immutable result of a build: everything an external parallel-scan
/// kernel needs to tokenize a byte string in O(log n) depth.
///
/// Built once, never mutated afterwards — safe to share across any number
/// of concurrent readers without synchronization.
pub struct Lexer {
    /// One entry per byte `0..=MAX_SYM`: `(interned parallel-state index, produces_lexeme)`.
    pub initial_states: Box<[Transition; MAX_SYM + 1]>,
    pub merge_table: MergeTable,
    pub identity_state_index: StateIndex,
    /// Entry `i` is the lexeme recognized when the DFA, started at `START`,
    /// ends in the state that interned parallel state `i` takes `START` to.
    pub final_states: Vec<Option<LexemeHandle>>,
}

impl Lexer {
    /// Number of distinct interned parallel states, `K`.
    pub fn state_count(&self) -> usize {
        self.final_states.len()
    }

    /// Emits cardinalities and the merge table's memory footprint through
    /// `log::info!`. Diagnostics only; not part of the functional API.
    pub fn report_sizes(&self) {
        let k = self.state_count();
        let merge_bytes = self.merge_table.capacity() * self.merge_table.capacity()
            * std::mem::size_of::<Transition>();
        log::info!(
            "lexer table: {} initial states, {} interned parallel states (K), \
             merge table capacity {} ({} bytes), identity = {}",
            self.initial_states.len(),
            k,
            self.merge_table.capacity(),
            merge_bytes,
            self.identity_state_index,
        );
    }

    /// Reference sequential evaluator: folds `bytes` through `merge_table`
    /// starting from the identity state. This is *not* how a parallel
    /// consumer is meant to use these tables (the whole point of the
    /// artifact is to let it fold in `O(log n)` depth instead); it exists
    /// so tests can check the tables against the obvious definition.
    pub fn fold_bytes(&self, bytes: &[u8]) -> StateIndex {
        let mut acc = self.identity_state_index;
        for &b in bytes {
            let step = self.initial_states[b as usize].result_state;
            acc = self
                .merge_table
                .get(acc as usize, step as usize)
                .result_state;
        }
        acc
    }

    /// The lexeme recognized by feeding `bytes` through the DFA from START,
    /// per the reference sequential fold.
    pub fn lexeme_for(&self, bytes: &[u8]) -> Option<LexemeHandle> {
        let idx = self.fold_bytes(bytes);
        if idx == REJECT {
            None
        } else {
            self.final_states[idx as usize]
        }
    }
}
