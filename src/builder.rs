// src/builder.rs
//! The saturation algorithm: DFA -> [`Lexer`] artifact.
//!
//! Grounded on the workspace's original `lexer::tables::build::build_tables`
//! (base generators + parallel closure + dense merge fill), generalized from
//! one hand-built demo DFA to any [`Dfa`] implementation and reworked around
//! [`ParallelState`]/[`Interner`]/[`MergeTable`] instead of raw `Vec<Next>` keys.

use anyhow::Context;
use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;

use crate::artifact::Lexer;
use crate::dfa::{Dfa, MAX_SYM, StateIndex};
use crate::error::BuildError;
use crate::interner::Interner;
use crate::merge_table::MergeTable;
use crate::parallel_state::ParallelState;
use crate::transition::Transition;

/// Checks the determinism and range contracts `build` trusts, without
/// running the saturation algorithm.
///
/// `build` itself assumes a well-formed `Dfa` and panics on violation; this
/// is the `Result`-returning front door for callers who'd rather validate
/// an untrusted collaborator first.
pub fn validate(dfa: &impl Dfa) -> Result<(), BuildError> {
    let n = dfa.num_states();
    let mut seen: HashMap<(StateIndex, u8), (StateIndex, bool)> = HashMap::new();
    for (src, sym, dst, produces_lexeme) in dfa.transitions() {
        if src as usize >= n {
            return Err(BuildError::StateIndexOutOfRange { state: src, limit: n });
        }
        if dst as usize >= n {
            return Err(BuildError::StateIndexOutOfRange { state: dst, limit: n });
        }
        if let Some(&prev) = seen.get(&(src, sym)) {
            if prev != (dst, produces_lexeme) {
                return Err(BuildError::NonDeterministic { state: src, symbol: sym });
            }
        } else {
            seen.insert((src, sym), (dst, produces_lexeme));
        }
    }
    Ok(())
}

/// Builds the parallel-scan lexer table for `dfa`.
///
/// Trusts the input to be deterministic (see [`validate`] for callers that
/// would rather check first); panics on a non-deterministic DFA, aborting
/// with a diagnostic instead of building off a bad assumption.
pub fn build(dfa: &impl Dfa) -> Lexer {
    if let Err(e) = validate(dfa) {
        log::error!("build: invalid DFA: {e}");
        panic!("build: invalid DFA: {e}");
    }
    build_trusted(dfa)
}

/// Fallible sibling of [`build`] for embedders who would rather chain `?`
/// than risk a panic on an untrusted `Dfa` — validates first, then builds.
pub fn try_build(dfa: &impl Dfa) -> anyhow::Result<Lexer> {
    validate(dfa).context("validating DFA before building parallel-scan lexer tables")?;
    Ok(build_trusted(dfa))
}

fn build_trusted(dfa: &impl Dfa) -> Lexer {
    let n = dfa.num_states();
    let start = dfa.start();

    let mut interner = Interner::new();
    let mut merge_table = MergeTable::new();

    // Step 1 — seed one ParallelState per byte from the DFA's transition
    // relation, leaving un-set entries at their default (REJECT, false).
    let mut initial_raw: Vec<ParallelState> = (0..=MAX_SYM).map(|_| ParallelState::new(n)).collect();
    for (src, sym, dst, produces_lexeme) in dfa.transitions() {
        initial_raw[sym as usize].set(src, Transition { result_state: dst, produces_lexeme });
    }

    let mut initial_states: Vec<Transition> = Vec::with_capacity(MAX_SYM + 1);
    for state in initial_raw {
        let produces_lexeme_at_start = state.get(start).produces_lexeme;
        let id = interner.intern(state, &mut merge_table);
        initial_states.push(Transition { result_state: id, produces_lexeme: produces_lexeme_at_start });
    }

    // Step 2 — seed the identity, the monoid unit.
    let identity_state_index = interner.intern(ParallelState::identity(n), &mut merge_table);

    // Step 3 — saturate under merge until a full sweep adds nothing new.
    saturate(&mut interner, &mut merge_table, identity_state_index);

    // Step 4 — fill the merge table and final-states table over the now-closed
    // set of interned states, in parallel (mirrors build_merge_and_maps_parallel).
    let states = interner.states().to_vec();
    let k = states.len();
    merge_table.par_fill(k, |i, j| {
        let composed_idx = compose_index(&states, &interner, identity_state_index, i as StateIndex, j as StateIndex);
        let produces_lexeme = states[composed_idx as usize].get(start).produces_lexeme;
        Transition { result_state: composed_idx, produces_lexeme }
    });

    let final_states: Vec<Option<crate::dfa::LexemeHandle>> =
        states.iter().map(|p| dfa.lexeme_at(p.get(start).result_state)).collect();

    let initial_states: Box<[Transition; MAX_SYM + 1]> = initial_states
        .into_boxed_slice()
        .try_into()
        .unwrap_or_else(|_| unreachable!("exactly MAX_SYM + 1 initial states were seeded"));

    Lexer { initial_states, merge_table, identity_state_index, final_states }
}

/// `merge(i, j)`: the monoidal-unit short-circuit, then plain composition.
fn compose(states: &[ParallelState], identity: StateIndex, i: StateIndex, j: StateIndex) -> ParallelState {
    if i == identity {
        states[j as usize].clone()
    } else if j == identity {
        states[i as usize].clone()
    } else {
        states[i as usize].composed(&states[j as usize])
    }
}

/// Same as [`compose`] but returns the already-interned index instead of a
/// fresh `ParallelState` — used once saturation has closed the set so every
/// composition is guaranteed to already be present.
fn compose_index(
    states: &[ParallelState],
    interner: &Interner,
    identity: StateIndex,
    i: StateIndex,
    j: StateIndex,
) -> StateIndex {
    if i == identity {
        return j;
    }
    if j == identity {
        return i;
    }
    let composed = states[i as usize].composed(&states[j as usize]);
    interner
        .find(&composed)
        .expect("saturation should have interned every composition")
}

/// Saturates `interner` under pairwise merge, re-reading `interner.len()`
/// each round so states discovered by one round's compositions are
/// themselves composed against everything in the next. Each round composes
/// the newly-discovered frontier against every known state (both orders) in
/// parallel with `rayon`; the resulting set of brand-new canonical states is
/// deduped and inserted single-threadedly so index assignment stays
/// independent of thread-pool scheduling. The merge table itself is filled
/// separately, once the set is closed (see `build_trusted`).
fn saturate(interner: &mut Interner, merge_table: &mut MergeTable, identity: StateIndex) {
    let mut round = 0usize;
    let mut frontier_start: StateIndex = 0;

    loop {
        let total = interner.len() as StateIndex;
        if frontier_start >= total {
            break;
        }
        let frontier: Vec<StateIndex> = (frontier_start..total).collect();
        let all: Vec<StateIndex> = (0..total).collect();
        let states = interner.states().to_vec();

        // new x all, then all x new: the two directions of composition are
        // independent of each other and of any insertion decided this round.
        let discovered: HashSet<ParallelState> = frontier
            .par_iter()
            .fold(HashSet::new, |mut local, &i| {
                for &j in &all {
                    let composed = compose(&states, identity, i, j);
                    if interner.find(&composed).is_none() {
                        local.insert(composed);
                    }
                }
                local
            })
            .chain(all.par_iter().fold(HashSet::new, |mut local, &i| {
                for &j in &frontier {
                    let composed = compose(&states, identity, i, j);
                    if interner.find(&composed).is_none() {
                        local.insert(composed);
                    }
                }
                local
            }))
            .reduce(HashSet::new, |mut a, b| {
                a.extend(b);
                a
            });

        round += 1;
        for state in discovered {
            interner.intern(state, merge_table);
        }
        log::debug!("saturate: round {round}, table size now {}", interner.len());

        frontier_start = total;
    }
}
