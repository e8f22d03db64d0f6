//! Table emitter: flattens a minimized [`Dfa`](crate::dfa::Dfa) into the
//! dense, read-only [`Machine`] that is this crate's sole product.

use crate::codeunit::CodeUnit;
use crate::dfa::Dfa;
use crate::nfa::Label;
use crate::table::Table;

/// One state of a compiled [`Machine`]: an accept label and its outgoing
/// transitions, sorted ascending by `on`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    pub accepts: Label,
    pub transitions: Vec<(CodeUnit, usize)>,
}

/// A compiled, dense lexer table. `states[0]` is always the start state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub states: Vec<MachineState>,
}

impl Machine {
    /// Walks `dfa` in survivor order and emits a [`Machine`]; `dfa` is
    /// expected to already be minimized, though emission itself does not
    /// require it.
    pub fn from_dfa(dfa: &Dfa) -> Machine {
        debug_assert_eq!(dfa.start, 0, "the start state must already be index 0");
        let states = dfa
            .states
            .iter()
            .map(|state| MachineState {
                accepts: state.accepts,
                transitions: state.transitions.iter().map(|(&on, &to)| (on, to)).collect(),
            })
            .collect();
        Machine { states }
    }

    /// Renders the table as aligned columns, for human inspection; the same
    /// role as the reference crate's `to_table`.
    pub fn to_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .states
            .iter()
            .enumerate()
            .map(|(i, state)| {
                let mut row = vec![i.to_string(), state.accepts.to_string()];
                row.extend(state.transitions.iter().map(|(on, to)| format!("{on}->{to}")));
                row
            })
            .collect();

        let mut table = Table::default();
        for row in &rows {
            table.push_row(row.iter().map(String::as_str).collect());
        }
        table.to_string(" ")
    }
}
