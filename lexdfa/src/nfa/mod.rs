//! # Nondeterministic finite automaton with ε-moves
//!
//! [`Nfa`] is an arena of [`NfaState`]s, indexed by `usize` identifiers
//! assigned in allocation order. Star and plus introduce cycles in the state
//! graph, so states are owned by the arena rather than by each other; edges
//! are plain indices, never recursive ownership.
//!
//! State `0` is always the super-start: [`Nfa::new`] allocates it before
//! anything else, and [`Nfa::join`] epsilon-links every pattern's fragment
//! start to it.

use crate::codeunit::CodeUnit;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// A positive integer identifying which pattern accepted; `0` means
/// non-accepting. Ties between overlapping patterns are resolved by the
/// maximum label.
pub type Label = u32;

#[derive(Debug, Clone)]
pub struct NfaState {
    pub id: usize,
    pub epsilon: Vec<usize>,
    pub transitions: BTreeMap<CodeUnit, Vec<usize>>,
    pub accepts: Label,
}

impl NfaState {
    fn new(id: usize) -> Self {
        NfaState {
            id,
            epsilon: Vec::new(),
            transitions: BTreeMap::new(),
            accepts: 0,
        }
    }
}

/// A sub-NFA with a designated entry and exit, as produced by the parser's
/// primitives and combined by its operators.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub start: usize,
    pub end: usize,
}

/// Arena owning every NFA state created while compiling a pattern bundle.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub states: Vec<NfaState>,
    pub start: usize,
}

impl Nfa {
    /// Creates an arena containing only the super-start state (id `0`).
    pub fn new() -> Self {
        let mut nfa = Nfa {
            states: Vec::new(),
            start: 0,
        };
        let super_start = nfa.new_state();
        nfa.start = super_start;
        nfa
    }

    pub fn new_state(&mut self) -> usize {
        let id = self.states.len();
        self.states.push(NfaState::new(id));
        id
    }

    pub fn add_epsilon(&mut self, from: usize, to: usize) {
        self.states[from].epsilon.push(to);
    }

    pub fn add_transition(&mut self, from: usize, on: CodeUnit, to: usize) {
        self.states[from].transitions.entry(on).or_default().push(to);
    }

    pub fn set_accepts(&mut self, state: usize, label: Label) {
        self.states[state].accepts = label;
    }

    /// Epsilon-links `pattern_start` from the super-start, unifying it into
    /// the bundle.
    pub fn join(&mut self, pattern_start: usize) {
        let start = self.start;
        self.add_epsilon(start, pattern_start);
    }

    /// Literal `c`: two fresh states `s → c → e`.
    pub fn literal(&mut self, c: CodeUnit) -> Fragment {
        let s = self.new_state();
        let e = self.new_state();
        self.add_transition(s, c, e);
        Fragment { start: s, end: e }
    }

    /// Concatenation `L·R`: epsilon `L.end → R.start`.
    pub fn concat(&mut self, l: Fragment, r: Fragment) -> Fragment {
        self.add_epsilon(l.end, r.start);
        Fragment {
            start: l.start,
            end: r.end,
        }
    }

    /// Alternation `L|R`: fresh `s, e`; epsilons `s→L.start`, `s→R.start`,
    /// `L.end→e`, `R.end→e`.
    pub fn alternate(&mut self, l: Fragment, r: Fragment) -> Fragment {
        let s = self.new_state();
        let e = self.new_state();
        self.add_epsilon(s, l.start);
        self.add_epsilon(s, r.start);
        self.add_epsilon(l.end, e);
        self.add_epsilon(r.end, e);
        Fragment { start: s, end: e }
    }

    /// Kleene star `L*`: one fresh state `n`; epsilons `n→L.start`,
    /// `L.end→n`; the fragment's start and end are both `n`.
    pub fn star(&mut self, l: Fragment) -> Fragment {
        let n = self.new_state();
        self.add_epsilon(n, l.start);
        self.add_epsilon(l.end, n);
        Fragment { start: n, end: n }
    }

    /// Option `L?`: epsilon `L.start→L.end`; the fragment is unchanged.
    pub fn option(&mut self, l: Fragment) -> Fragment {
        self.add_epsilon(l.start, l.end);
        l
    }

    /// Repetition `L+`: fresh `s, e`; epsilons `s→L.start`, `L.end→e`, and
    /// `L.end→L.start`. No `s→e` edge: that is what distinguishes true
    /// `L(L|ε)*` one-or-more semantics from `L?`.
    pub fn plus(&mut self, l: Fragment) -> Fragment {
        let s = self.new_state();
        let e = self.new_state();
        self.add_epsilon(s, l.start);
        self.add_epsilon(l.end, e);
        self.add_epsilon(l.end, l.start);
        Fragment { start: s, end: e }
    }

    /// Epsilon closure of a set of state ids: the least fixpoint containing
    /// `seeds` and closed under epsilon edges, computed with a worklist
    /// frontier so that already-visited states are never re-expanded.
    pub fn epsilon_closure(&self, seeds: impl IntoIterator<Item = usize>) -> BTreeSet<usize> {
        let mut closure: BTreeSet<usize> = BTreeSet::new();
        let mut frontier: Vec<usize> = Vec::new();
        for seed in seeds {
            if closure.insert(seed) {
                frontier.push(seed);
            }
        }
        while let Some(state) = frontier.pop() {
            for &next in &self.states[state].epsilon {
                if closure.insert(next) {
                    frontier.push(next);
                }
            }
        }
        closure
    }

    /// `move(S, c)`: the successors of any state in `S` on symbol `c`. `S` is
    /// expected to already be epsilon-closed.
    pub fn step(&self, states: &BTreeSet<usize>, on: CodeUnit) -> BTreeSet<usize> {
        let mut out = BTreeSet::new();
        for &s in states {
            if let Some(targets) = self.states[s].transitions.get(&on) {
                out.extend(targets.iter().copied());
            }
        }
        out
    }

    /// Every distinct symbol leaving any state in `states`, in ascending
    /// `CodeUnit` order.
    pub fn outgoing_symbols(&self, states: &BTreeSet<usize>) -> BTreeSet<CodeUnit> {
        let mut symbols = BTreeSet::new();
        for &s in states {
            symbols.extend(self.states[s].transitions.keys().copied());
        }
        symbols
    }

    /// `max { accept(s) : s ∈ states }`, `0` if none accept.
    pub fn accept_label(&self, states: &BTreeSet<usize>) -> Label {
        states
            .iter()
            .map(|&s| self.states[s].accepts)
            .max()
            .unwrap_or(0)
    }
}

impl Default for Nfa {
    fn default() -> Self {
        Self::new()
    }
}
