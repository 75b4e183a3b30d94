// src/parallel_state.rs
use crate::dfa::{REJECT, StateIndex};
use crate::transition::Transition;

/// A total function from DFA states to [`Transition`]s — the value a
/// byte (or a composed run of bytes) denotes under the parallel-scan monoid.
///
/// Stored with `n + 1` slots: `0..n` are the real DFA states, and slot `n`
/// is a fixed `(REJECT, false)` sink. Sizing REJECT in as a real slot keeps
/// [`ParallelState::merge`] a straight-line loop with no branch on REJECT.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ParallelState {
    n: usize,
    trans: Vec<Transition>,
}

impl ParallelState {
    /// Blank state over `n` DFA states: every real slot defaults to
    /// `(REJECT, false)`, same as the reserved REJECT slot.
    pub fn new(n: usize) -> Self {
        ParallelState {
            n,
            trans: vec![Transition::default(); n + 1],
        }
    }

    /// The monoid unit: `I[s] = (s, false)` for every real state `s`.
    pub fn identity(n: usize) -> Self {
        let mut p = ParallelState::new(n);
        for s in 0..n {
            p.trans[s] = Transition {
                result_state: s as StateIndex,
                produces_lexeme: false,
            };
        }
        p
    }

    pub fn num_states(&self) -> usize {
        self.n
    }

    #[inline]
    fn slot(&self, s: StateIndex) -> usize {
        if s == REJECT { self.n } else { s as usize }
    }

    #[inline]
    pub fn get(&self, s: StateIndex) -> Transition {
        self.trans[self.slot(s)]
    }

    #[inline]
    pub fn set(&mut self, s: StateIndex, t: Transition) {
        let i = self.slot(s);
        self.trans[i] = t;
    }

    /// In-place left-composition: realizes `other ∘ self`, i.e. "apply
    /// `self` first, then `other`" — the semantics of reading two character
    /// classes left-to-right.
    pub fn merge(&mut self, other: &ParallelState) {
        for s in 0..self.n {
            let mid = self.trans[s].result_state;
            self.trans[s] = other.get(mid);
        }
    }

    /// Non-mutating composition: `self` then `other`, as a fresh state.
    pub fn composed(&self, other: &ParallelState) -> ParallelState {
        let mut out = self.clone();
        out.merge(other);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_pointwise_itself() {
        let id = ParallelState::identity(4);
        for s in 0..4u32 {
            let t = id.get(s);
            assert_eq!(t.result_state, s);
            assert!(!t.produces_lexeme);
        }
    }

    #[test]
    fn merge_reads_left_then_right() {
        // self: 0->1, 1->2 ; other: 1->9(emit), 2->8
        let mut a = ParallelState::new(3);
        a.set(0, Transition { result_state: 1, produces_lexeme: false });
        a.set(1, Transition { result_state: 2, produces_lexeme: false });
        a.set(2, Transition { result_state: 2, produces_lexeme: false });

        let mut b = ParallelState::new(3);
        b.set(1, Transition { result_state: 9, produces_lexeme: true });
        b.set(2, Transition { result_state: 8, produces_lexeme: false });

        a.merge(&b);
        // a[0] = 1 ->(via b) 9, emit=true
        assert_eq!(a.get(0), Transition { result_state: 9, produces_lexeme: true });
        // a[1] = 2 ->(via b) 8
        assert_eq!(a.get(1), Transition { result_state: 8, produces_lexeme: false });
    }

    #[test]
    fn reject_is_absorbing() {
        let mut a = ParallelState::new(2);
        a.set(0, Transition { result_state: REJECT, produces_lexeme: false });
        let mut b = ParallelState::new(2);
        b.set(1, Transition { result_state: 1, produces_lexeme: true }); // should never be hit via REJECT
        a.merge(&b);
        assert_eq!(a.get(0), Transition::default());
    }
}
