//! Signature-based partition-refinement minimizer.
//!
//! Round 0 seeds one bin per `(accepts, out-degree)` pair, ignoring
//! transition targets (their bin representatives aren't meaningful yet).
//! Every later round's signature also includes, for each outgoing edge, the
//! *current* bin representative of its target. Refinement repeats until a
//! full pass produces no further splits, then every bin collapses to its
//! representative: the first state encountered in allocation order.

use super::{Dfa, DfaState};
use crate::codeunit::CodeUnit;
use crate::nfa::Label;
use std::collections::BTreeMap;

type Signature = (Label, usize, Vec<(CodeUnit, usize)>);

impl Dfa {
    /// Merges behaviorally indistinguishable states in place. After this
    /// call, no two states share an `(accepts, sorted transitions)`
    /// signature, and the original start state is index `0` in the result.
    pub fn minimize(&mut self) {
        let n = self.states.len();
        if n == 0 {
            return;
        }

        let mut parent = seed_by_accept_and_degree(&self.states);
        loop {
            let new_parent = refine(&self.states, &parent);
            if new_parent == parent {
                break;
            }
            parent = new_parent;
        }

        self.collapse(&parent);
    }

    fn collapse(&mut self, parent: &[usize]) {
        let start_rep = parent[self.start];
        let mut reps: Vec<usize> = parent
            .iter()
            .copied()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        reps.retain(|&r| r != start_rep);
        reps.insert(0, start_rep);

        let new_index: BTreeMap<usize, usize> = reps
            .iter()
            .enumerate()
            .map(|(i, &rep)| (rep, i))
            .collect();

        let new_states = reps
            .iter()
            .enumerate()
            .map(|(i, &rep)| {
                let old = &self.states[rep];
                let transitions = old
                    .transitions
                    .iter()
                    .map(|(&on, &to)| (on, new_index[&parent[to]]))
                    .collect();
                DfaState {
                    id: i,
                    transitions,
                    accepts: old.accepts,
                }
            })
            .collect();

        self.states = new_states;
        self.start = 0;
    }
}

/// Round 0: group purely by `(accepts, out-degree)`.
fn seed_by_accept_and_degree(states: &[DfaState]) -> Vec<usize> {
    let mut groups: BTreeMap<(Label, usize), Vec<usize>> = BTreeMap::new();
    for state in states {
        groups
            .entry((state.accepts, state.transitions.len()))
            .or_default()
            .push(state.id);
    }
    assign_representatives(states.len(), groups.values())
}

/// One refinement round: rebuckets every state by its full signature under
/// the previous round's `parent` map, splitting bins whose members no longer
/// agree.
fn refine(states: &[DfaState], parent: &[usize]) -> Vec<usize> {
    let mut groups: BTreeMap<Signature, Vec<usize>> = BTreeMap::new();
    for state in states {
        groups.entry(signature(state, parent)).or_default().push(state.id);
    }
    assign_representatives(states.len(), groups.values())
}

fn signature(state: &DfaState, parent: &[usize]) -> Signature {
    let edges = state
        .transitions
        .iter()
        .map(|(&on, &to)| (on, parent[to]))
        .collect();
    (state.accepts, state.transitions.len(), edges)
}

/// Within a bin, the first state encountered in allocation order becomes its
/// representative. `groups`' members are already in ascending-id order,
/// since states are scanned `0..n`.
fn assign_representatives<'a>(n: usize, groups: impl Iterator<Item = &'a Vec<usize>>) -> Vec<usize> {
    let mut parent = vec![0usize; n];
    for members in groups {
        let rep = members[0];
        for &m in members {
            parent[m] = rep;
        }
    }
    parent
}
