// src/lib.rs
//! Builds a parallel-scan lexer table — a transition monoid — from a
//! deterministic byte DFA, so a data-parallel scan (e.g. a GPU prefix-scan)
//! can tokenize input in `O(log n)` depth instead of folding byte-by-byte.
//!
//! The grammar/DFA-construction stage, the token-naming layer, and the
//! runtime parallel scan that actually consumes these tables are all
//! external collaborators; this crate only builds the tables. See
//! [`builder::build`] for the entry point and [`dfa::Dfa`] for the trait the
//! builder is generic over.

pub mod artifact;
pub mod builder;
pub mod dfa;
pub mod error;
pub mod interner;
pub mod merge_table;
pub mod parallel_state;
pub mod transition;

pub use artifact::Lexer;
pub use builder::{build, try_build, validate};
pub use dfa::{Dfa, LexemeHandle, MAX_SYM, REJECT, SimpleDfa, StateIndex};
pub use error::BuildError;
pub use merge_table::{GrowthConfig, MergeTable};
pub use parallel_state::ParallelState;
pub use transition::Transition;
