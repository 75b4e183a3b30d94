// src/interner.rs
use hashbrown::HashMap;

use crate::dfa::StateIndex;
use crate::merge_table::MergeTable;
use crate::parallel_state::ParallelState;

/// Bijection between canonical [`ParallelState`]s and dense indices
/// `0..K`, assigned in first-seen order. Two parallel containers —
/// a contiguous `states` vector and a hash map keyed by the same
/// states — are kept in lock-step: `merge` and saturation need O(1)
/// index-to-state lookup, while dedup needs hash lookup by structural key.
#[derive(Default)]
pub struct Interner {
    states: Vec<ParallelState>,
    index: HashMap<ParallelState, StateIndex>,
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            states: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[ParallelState] {
        &self.states
    }

    pub fn get(&self, id: StateIndex) -> &ParallelState {
        &self.states[id as usize]
    }

    /// Read-only lookup; does not insert.
    pub fn find(&self, state: &ParallelState) -> Option<StateIndex> {
        self.index.get(state).copied()
    }

    /// Insert `state` if not already present, signaling growth to
    /// `merge_table` so its logical side always matches `self.len()`.
    /// Returns the (possibly pre-existing) index.
    pub fn intern(&mut self, state: ParallelState, merge_table: &mut MergeTable) -> StateIndex {
        if let Some(&id) = self.index.get(&state) {
            return id;
        }
        let id = self.states.len() as StateIndex;
        self.index.insert(state.clone(), id);
        self.states.push(state);
        merge_table.resize(self.states.len());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_state_twice_returns_the_same_index() {
        let mut interner = Interner::new();
        let mut merge_table = MergeTable::new();
        let a = ParallelState::identity(3);
        let b = ParallelState::identity(3);

        let ia = interner.intern(a, &mut merge_table);
        let ib = interner.intern(b, &mut merge_table);
        assert_eq!(ia, ib);
        assert_eq!(interner.len(), 1);
        assert_eq!(merge_table.k(), 1);
    }
}
