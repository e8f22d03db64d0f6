//! # Deterministic finite automaton
//!
//! [`Dfa`] is produced from an [`Nfa`](crate::nfa::Nfa) by [`from_nfa`], the
//! subset construction. Every state has exactly one successor per symbol by
//! construction; [`minimize`] then collapses behaviorally equivalent states
//! in place.

pub mod minimize;

use crate::codeunit::CodeUnit;
use crate::nfa::{Label, Nfa};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Clone)]
pub struct DfaState {
    pub id: usize,
    pub transitions: BTreeMap<CodeUnit, usize>,
    pub accepts: Label,
}

#[derive(Debug, Clone)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub start: usize,
}

/// Subset construction: converts `nfa` to an equivalent DFA via epsilon
/// closure and per-symbol transition sets, with a worklist of unexplored
/// state-sets and an ordered map keyed by the canonical (sorted-by-NFA-
/// identifier) state-set so equal sets collapse to the same DFA state.
///
/// States and symbols are visited in ascending order throughout, so that
/// identifier assignment is reproducible across runs for a fixed input.
pub fn from_nfa(nfa: &Nfa) -> Dfa {
    let mut map: BTreeMap<BTreeSet<usize>, usize> = BTreeMap::new();
    let mut states: Vec<DfaState> = Vec::new();
    let mut worklist: VecDeque<BTreeSet<usize>> = VecDeque::new();

    let q0 = nfa.epsilon_closure([nfa.start]);
    map.insert(q0.clone(), 0);
    states.push(DfaState {
        id: 0,
        transitions: BTreeMap::new(),
        accepts: nfa.accept_label(&q0),
    });
    worklist.push_back(q0);

    while let Some(set) = worklist.pop_front() {
        let id = map[&set];
        for on in nfa.outgoing_symbols(&set) {
            let moved = nfa.step(&set, on);
            let closed = nfa.epsilon_closure(moved);
            let target_id = *map.entry(closed.clone()).or_insert_with(|| {
                let id = states.len();
                states.push(DfaState {
                    id,
                    transitions: BTreeMap::new(),
                    accepts: nfa.accept_label(&closed),
                });
                worklist.push_back(closed);
                id
            });
            states[id].transitions.insert(on, target_id);
        }
    }

    Dfa { states, start: 0 }
}
