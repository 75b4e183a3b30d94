// src/dfa.rs
//! The grammar / DFA-construction stage is an external collaborator; this
//! module only defines the trait the builder is generic over, plus a tiny
//! hand-built harness (`SimpleDfa`) standing in for that collaborator in
//! tests and doc examples.

use hashbrown::HashMap;

/// Index of a DFA state. Reused (double duty, same as the rest of this
/// crate) as the index of an interned [`crate::parallel_state::ParallelState`]
/// once we leave DFA-space and enter parallel-state-space.
pub type StateIndex = u32;

/// Sentinel `StateIndex` meaning "no transition defined". Never a valid DFA
/// state; implementations must keep it distinct from any `num_states()` range.
pub const REJECT: StateIndex = StateIndex::MAX;

/// Largest input byte (inclusive). The alphabet is flat bytes, not Unicode
/// codepoints.
pub const MAX_SYM: usize = 255;

/// An opaque handle to a lexeme attached to an accepting DFA state.
///
/// The token-naming layer (human-readable names -> ids) lives entirely
/// outside this crate; we only need equality and the ability to copy the
/// handle around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LexemeHandle(pub u32);

/// A deterministic finite automaton over bytes, as produced by the (external)
/// grammar/DFA-construction collaborator.
///
/// Every transition is on a concrete symbol — `sym` is never a wildcard or a
/// range. The builder asserts this determinism; see [`crate::builder::validate`].
pub trait Dfa {
    /// Number of states, `N`. States are addressed `0..N`.
    fn num_states(&self) -> usize;

    /// The distinguished start state.
    fn start(&self) -> StateIndex;

    /// All outgoing transitions, as `(src, symbol, dst, produces_lexeme)`.
    /// Order is not significant.
    fn transitions(&self) -> Box<dyn Iterator<Item = (StateIndex, u8, StateIndex, bool)> + '_>;

    /// The lexeme attached to `state`, if any.
    fn lexeme_at(&self, state: StateIndex) -> Option<LexemeHandle>;
}

/// A plain adjacency-table `Dfa`, built with a small fluent API.
///
/// This is a test/doc harness, not a lexical-grammar engine: it exists to
/// let unit and property tests exercise the saturation algorithm against
/// hand-built automata of varying shapes (self-loops, dead states,
/// multi-symbol tokens) without depending on a real grammar collaborator.
#[derive(Debug, Clone, Default)]
pub struct SimpleDfa {
    num_states: usize,
    start: StateIndex,
    transitions: Vec<(StateIndex, u8, StateIndex, bool)>,
    lexemes: HashMap<StateIndex, LexemeHandle>,
}

impl SimpleDfa {
    pub fn new(num_states: usize) -> Self {
        Self {
            num_states,
            start: 0,
            transitions: Vec::new(),
            lexemes: HashMap::new(),
        }
    }

    pub fn with_start(mut self, start: StateIndex) -> Self {
        self.start = start;
        self
    }

    pub fn add_transition(mut self, src: StateIndex, symbol: u8, dst: StateIndex, produces_lexeme: bool) -> Self {
        self.transitions.push((src, symbol, dst, produces_lexeme));
        self
    }

    pub fn set_lexeme(mut self, state: StateIndex, lexeme: LexemeHandle) -> Self {
        self.lexemes.insert(state, lexeme);
        self
    }
}

impl Dfa for SimpleDfa {
    fn num_states(&self) -> usize {
        self.num_states
    }

    fn start(&self) -> StateIndex {
        self.start
    }

    fn transitions(&self) -> Box<dyn Iterator<Item = (StateIndex, u8, StateIndex, bool)> + '_> {
        Box::new(self.transitions.iter().copied())
    }

    fn lexeme_at(&self, state: StateIndex) -> Option<LexemeHandle> {
        self.lexemes.get(&state).copied()
    }
}
